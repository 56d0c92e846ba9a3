//! Command-line argument parsing for typeahead.
//!
//! Uses clap; flags given here take precedence over the config file.

use crate::autocomplete::CommitMode;
use crate::config::{Config, WidgetConfig};
use crate::error::{Result, TypeaheadError};
use crate::source::{HttpConfig, SourceSpec};
use clap::Parser;
use std::path::PathBuf;

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output of the final screen.
    #[default]
    Text,
    /// JSON output with screen, state, and metadata.
    Json,
    /// Frame-by-frame output showing state after each event.
    Frames,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "frames" => Ok(Self::Frames),
            _ => Err(format!(
                "Invalid output format: {s}. Expected: text, json, or frames"
            )),
        }
    }
}

/// A keyboard-driven typeahead over any JSON array of records.
#[derive(Parser, Debug)]
#[command(name = "typeahead")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// URL or JSON file holding an array of records
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Record field used as the label
    #[arg(short = 'l', long, value_name = "FIELD")]
    pub label: Option<String>,

    /// Rows of the options list visible at once
    #[arg(short = 'r', long, value_name = "ROWS")]
    pub rows: Option<usize>,

    /// What a commit writes into the input (label or clear)
    #[arg(long, value_name = "MODE")]
    pub commit: Option<String>,

    /// Use the legacy behaviour (no preview, no jump keys, no scrolling)
    #[arg(long)]
    pub legacy: bool,

    /// Config file path
    #[arg(long, value_name = "PATH", env = "TYPEAHEAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use the built-in sample records instead of SOURCE
    #[arg(long)]
    pub mock_data: bool,

    // === Headless mode options ===
    /// Run in headless mode (no terminal UI, for testing/automation)
    #[arg(long)]
    pub headless: bool,

    /// Comma-separated events to execute in headless mode (e.g., "type:al,key:down")
    #[arg(long, value_name = "EVENTS")]
    pub events: Option<String>,

    /// Path to script file with events (use "-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Screen size for headless mode (WIDTHxHEIGHT, e.g., "80x24")
    #[arg(long, value_name = "SIZE", default_value = "80x24")]
    pub size: String,

    /// Output format for headless mode
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,

    /// Write output to file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Stop on first assertion failure
    #[arg(long)]
    pub fail_fast: bool,
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: SourceSpec,
    pub http: HttpConfig,
    pub widget: WidgetConfig,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns true if headless mode is enabled.
    pub fn is_headless(&self) -> bool {
        self.headless
    }

    /// Merges CLI flags over `config`.
    pub fn resolve(&self, config: Config) -> Result<Settings> {
        let mut widget = config.widget;

        if let Some(label) = &self.label {
            widget.label = label.clone();
        }
        if let Some(rows) = self.rows {
            if rows == 0 {
                return Err(TypeaheadError::config("--rows must be at least 1"));
            }
            widget.max_visible = rows;
        }
        if let Some(commit) = &self.commit {
            widget.commit = commit
                .parse::<CommitMode>()
                .map_err(TypeaheadError::config)?;
        }
        if self.legacy {
            widget.apply_legacy();
        }

        let source = if self.mock_data {
            SourceSpec::Sample
        } else {
            SourceSpec::parse(self.source.as_deref().unwrap_or(&config.source.url))
        };

        Ok(Settings {
            source,
            http: config.source.http_config(),
            widget,
        })
    }

    /// Parses the screen size from the --size argument.
    pub fn parse_screen_size(&self) -> std::result::Result<(u16, u16), String> {
        let parts: Vec<&str> = self.size.split('x').collect();
        if parts.len() != 2 {
            return Err(format!(
                "Invalid size format: '{}'. Expected WIDTHxHEIGHT (e.g., 80x24)",
                self.size
            ));
        }
        let width = parts[0]
            .parse::<u16>()
            .map_err(|_| format!("Invalid width: '{}'", parts[0]))?;
        let height = parts[1]
            .parse::<u16>()
            .map_err(|_| format!("Invalid height: '{}'", parts[1]))?;
        Ok((width, height))
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }

    /// Validates headless mode arguments.
    pub fn validate_headless(&self) -> std::result::Result<(), String> {
        if !self.headless {
            return Ok(());
        }

        if self.events.is_none() && self.script.is_none() {
            return Err("--headless requires --events or --script".to_string());
        }

        self.parse_screen_size()?;
        self.parse_output_format()?;

        Ok(())
    }
}
