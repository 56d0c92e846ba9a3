//! Integration tests for headless mode.

use super::common::{fixture, run_headless, run_json};

#[test]
fn test_headless_basic_execution() {
    let (code, stdout, _) = run_headless(&["--headless", "--mock-data", "--events", "key:esc"]);

    assert_eq!(code, 0, "Expected exit code 0");
    assert!(
        stdout.contains("Events: 1 executed"),
        "Should show events executed"
    );
}

#[test]
fn test_headless_requires_events() {
    let (code, _, stderr) = run_headless(&["--headless", "--mock-data"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("requires --events or --script"));
}

#[test]
fn test_headless_type_event() {
    let (code, json) = run_json("trio.json", "type:al", &[]);

    assert_eq!(code, 0);
    assert_eq!(json["state"]["input_text"], "al");
    assert_eq!(json["state"]["open"], true);
    assert_eq!(json["state"]["match_count"], 2);
    assert_eq!(json["state"]["record_count"], 3);
}

#[test]
fn test_headless_assertion_pass() {
    let (code, json) = run_json("trio.json", "type:al,assert:contains:Albert", &[]);

    assert_eq!(code, 0);
    assert_eq!(json["assertions"]["passed"], 1);
    assert_eq!(json["assertions"]["failed"], 0);
}

#[test]
fn test_headless_assertion_fail() {
    let (code, json) = run_json("trio.json", "type:al,assert:contains:Bob", &[]);

    assert_eq!(code, 1, "Should exit with code 1 on assertion failure");
    assert_eq!(json["assertions"]["passed"], 0);
    assert_eq!(json["assertions"]["failed"], 1);
}

#[test]
fn test_headless_fail_fast() {
    let (code, json) = run_json(
        "trio.json",
        "assert:state:open=true,type:al,assert:state:open=true",
        &["--fail-fast"],
    );

    assert_eq!(code, 1);
    assert_eq!(json["events_executed"], 1);
    assert_eq!(json["state"]["input_text"], "");
}

#[test]
fn test_headless_custom_size() {
    let (code, stdout, _) = run_headless(&[
        "--headless",
        "--mock-data",
        "--size",
        "40x10",
        "--events",
        "type:cl",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let lines = json["screen_lines"].as_array().unwrap();
    assert!(lines.len() <= 10);
    assert!(lines
        .iter()
        .all(|l| l.as_str().unwrap().chars().count() <= 40));
}

#[test]
fn test_headless_frames_output() {
    let path = fixture("trio.json");
    let (code, stdout, _) = run_headless(&[
        "--headless",
        &path,
        "--events",
        "type:al,key:down",
        "--output",
        "frames",
    ]);

    assert_eq!(code, 0);
    assert!(stdout.contains("=== FRAME 0 (initial) ==="));
    assert!(stdout.contains("=== FRAME 1 (type:al) ==="));
    assert!(stdout.contains("=== FRAME 2 (key:down) ==="));
    assert!(stdout.contains("Total: 3 frames"));
}

#[test]
fn test_headless_script_file() {
    let script = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        script.path(),
        "# pick Albert\ntype:al\nkey:down\nkey:enter\nassert:state:input_text=Albert\n",
    )
    .unwrap();
    let script_path = script.path().display().to_string();
    let path = fixture("trio.json");

    let (code, stdout, _) = run_headless(&[
        "--headless",
        &path,
        "--script",
        &script_path,
        "--output",
        "json",
    ]);

    assert_eq!(code, 0, "stdout: {stdout}");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["assertions"]["passed"], 1);
    assert_eq!(json["state"]["last_commit"], "Albert");
}

#[test]
fn test_headless_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.json");
    let out_arg = out.display().to_string();

    let (code, stdout, _) = run_headless(&[
        "--headless",
        "--mock-data",
        "--events",
        "type:le",
        "--output",
        "json",
        "--output-file",
        &out_arg,
    ]);

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&out).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["state"]["query"], "le");
}

#[test]
fn test_headless_missing_source_sets_error_flag() {
    let (code, stdout, _) = run_headless(&[
        "--headless",
        "/definitely/not/here.json",
        "--events",
        "type:a,assert:state:fetch_error=true",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["state"]["record_count"], 0);
    assert_eq!(json["state"]["open"], false);
}

#[test]
fn test_headless_invalid_event_fails() {
    let (code, _, stderr) = run_headless(&["--headless", "--mock-data", "--events", "jump:3"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown event type"));
}

#[test]
fn test_headless_placeholder_on_empty_input() {
    let (code, _) = run_json("trio.json", "assert:contains:> search", &[]);
    assert_eq!(code, 0);
}
