//! Error types for typeahead.
//!
//! Defines the main error enum used by the ambient layers (config, CLI,
//! terminal, scripts). Widget transitions themselves never fail.

use thiserror::Error;

/// Main error type for typeahead operations.
#[derive(Error, Debug)]
pub enum TypeaheadError {
    /// Record source errors (unreadable file, bad URL, etc.)
    #[error("Source error: {0}")]
    Source(String),

    /// Configuration errors (invalid config file, bad CLI values, bad scripts)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal setup, draw and teardown errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TypeaheadError {
    /// Creates a source error with the given message.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a terminal error with the given message.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Source(_) => "Source Error",
            Self::Config(_) => "Configuration Error",
            Self::Terminal(_) => "Terminal Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using TypeaheadError.
pub type Result<T> = std::result::Result<T, TypeaheadError>;
