//! Logging setup for typeahead.
//!
//! Where log lines go depends on the run mode: the interactive UI owns the
//! terminal, so its logs go to a file; headless runs log to stderr, leaving
//! stdout to the run's output.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "info";

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A file, truncated at startup.
    File(PathBuf),
    /// Standard error.
    Stderr,
}

impl LogTarget {
    /// Picks the target for a run: stderr when headless, the log file
    /// otherwise.
    pub fn for_mode(headless: bool) -> Self {
        if headless {
            Self::Stderr
        } else {
            Self::File(log_path())
        }
    }
}

/// Installs the global subscriber for `target`.
///
/// Returns the file being written to, if any. A log file that cannot be
/// opened disables logging rather than falling back to the terminal.
pub fn init(target: &LogTarget) -> Option<PathBuf> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    match target {
        LogTarget::Stderr => {
            // Already installed in this process is fine
            let _ = builder.with_writer(io::stderr).try_init();
            None
        }
        LogTarget::File(path) => {
            let file = match open_log_file(path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {}: {e}", path.display());
                    return None;
                }
            };
            let _ = builder.with_writer(file).with_ansi(false).try_init();
            Some(path.clone())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Creates the log file and its directory, truncating an existing file.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Default log file: `<state_dir>/typeahead/typeahead.log`, then the config
/// directory, then the temp directory.
pub fn log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("typeahead").join("typeahead.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("typeahead.log"))
}
