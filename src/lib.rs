//! Typeahead - a keyboard-driven autocomplete over JSON records.
//!
//! This library exposes the widget core, record sources and the terminal
//! front end for use by the binary and integration tests.

pub mod autocomplete;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod source;
pub mod tui;
