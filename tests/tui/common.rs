//! Common test utilities for TUI tests.

use std::path::PathBuf;
use std::process::Command;

/// Path of a file under `tests/fixtures`, as a string argument.
pub fn fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path.display().to_string()
}

/// Runs typeahead in headless mode with the given arguments.
///
/// Points the config at a file that does not exist so a user config never
/// leaks into the run.
pub fn run_headless(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_typeahead"))
        .env("TYPEAHEAD_CONFIG", "/nonexistent/typeahead/config.toml")
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

/// Runs against a fixture with JSON output and returns the parsed document.
pub fn run_json(fixture_name: &str, events: &str, extra: &[&str]) -> (i32, serde_json::Value) {
    let path = fixture(fixture_name);
    let mut args = vec![
        "--headless",
        path.as_str(),
        "--events",
        events,
        "--output",
        "json",
    ];
    args.extend_from_slice(extra);

    let (code, stdout, stderr) = run_headless(&args);
    let json = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON output ({e}): {stdout}\nstderr: {stderr}"));
    (code, json)
}
