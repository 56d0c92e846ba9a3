//! Configuration management for typeahead.
//!
//! Loads the record source and widget behaviour from a TOML file. CLI flags
//! override whatever the file says.

use crate::autocomplete::{CommitMode, WidgetOptions};
use crate::error::{Result, TypeaheadError};
use crate::source::HttpConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where records are loaded from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Widget behaviour.
    #[serde(default)]
    pub widget: WidgetConfig,
}

/// Record source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL or file path of a JSON array of records.
    #[serde(default = "default_url")]
    pub url: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "https://jsonplaceholder.typicode.com/users".to_string()
}

fn default_timeout() -> u64 {
    crate::source::http::DEFAULT_TIMEOUT_SECS
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::default().with_timeout(self.timeout_secs)
    }
}

/// Widget behaviour configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Record field used as the label.
    pub label: String,
    /// Rows of the options list visible at once.
    pub max_visible: usize,
    pub preview_on_navigate: bool,
    pub jump_keys: bool,
    pub scroll_into_view: bool,
    /// What a commit writes into the input: "label" or "clear".
    pub commit: CommitMode,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        let options = WidgetOptions::default();
        Self {
            label: "name".to_string(),
            max_visible: options.max_visible,
            preview_on_navigate: options.preview_on_navigate,
            jump_keys: options.jump_keys,
            scroll_into_view: options.scroll_into_view,
            commit: options.commit,
        }
    }
}

impl WidgetConfig {
    /// Switches to the legacy behaviour, keeping label, rows and commit mode.
    pub fn apply_legacy(&mut self) {
        let legacy = WidgetOptions::legacy();
        self.preview_on_navigate = legacy.preview_on_navigate;
        self.jump_keys = legacy.jump_keys;
        self.scroll_into_view = legacy.scroll_into_view;
    }

    pub fn to_options(&self) -> WidgetOptions {
        WidgetOptions {
            preview_on_navigate: self.preview_on_navigate,
            jump_keys: self.jump_keys,
            scroll_into_view: self.scroll_into_view,
            commit: self.commit,
            max_visible: self.max_visible,
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typeahead")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| TypeaheadError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            TypeaheadError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the widget cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.widget.label.trim().is_empty() {
            return Err(TypeaheadError::config("widget.label must not be empty"));
        }
        if self.widget.max_visible == 0 {
            return Err(TypeaheadError::config("widget.max_visible must be at least 1"));
        }
        Ok(())
    }
}
