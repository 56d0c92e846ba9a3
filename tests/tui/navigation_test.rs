//! Keyboard and pointer navigation through the headless binary.

use super::common::run_json;

#[test]
fn test_example_scenario() {
    let (code, json) = run_json(
        "trio.json",
        "type:al,\
         assert:state:active_index=1,\
         key:down,assert:state:input_text=Albert,\
         key:down,assert:state:input_text=Alice,\
         key:enter",
        &[],
    );

    assert_eq!(code, 0, "{json}");
    assert_eq!(json["assertions"]["passed"], 3);
    assert_eq!(json["state"]["input_text"], "Alice");
    assert_eq!(json["state"]["open"], false);
    assert_eq!(json["state"]["active_index"], 0);
}

#[test]
fn test_query_survives_preview() {
    let (_, json) = run_json("trio.json", "type:al,key:down", &[]);
    assert_eq!(json["state"]["input_text"], "Albert");
    assert_eq!(json["state"]["query"], "al");
    assert_eq!(json["semantics"]["active_descendant"], "typeahead-option-2");
}

#[test]
fn test_jump_keys() {
    let (code, json) = run_json(
        "many.json",
        "type:al,key:ctrl+down,assert:state:active_index=9,key:meta+up,assert:state:active_index=1",
        &[],
    );
    assert_eq!(code, 0, "{json}");
}

#[test]
fn test_scroll_follows_active_option() {
    let (code, json) = run_json(
        "many.json",
        "type:al,key:up,assert:contains:Alexis,assert:not-contains:Alice",
        &["--rows", "3"],
    );
    assert_eq!(code, 0, "{json}");
    assert_eq!(json["state"]["active_index"], 9);
    assert_eq!(json["state"]["scroll_offset"], 6);
}

#[test]
fn test_small_screen_scrolls_to_active_option() {
    let (code, json) = run_json(
        "many.json",
        "type:al,key:down,key:down,key:down,key:down,key:down,assert:contains:▸ Alvin",
        &["--size", "40x8"],
    );
    assert_eq!(code, 0, "{json}");
    assert_eq!(json["state"]["active_index"], 6);
    assert!(json["state"]["scroll_offset"].as_u64().unwrap() > 0);
}

#[test]
fn test_escape_keeps_text() {
    let (_, json) = run_json("trio.json", "type:al,key:down,key:esc", &[]);
    assert_eq!(json["state"]["input_text"], "Albert");
    assert_eq!(json["state"]["open"], false);
}

#[test]
fn test_click_commits() {
    let (_, json) = run_json("trio.json", "type:al,click:2", &[]);
    assert_eq!(json["state"]["input_text"], "Albert");
    assert_eq!(json["state"]["last_commit"], "Albert");
}

#[test]
fn test_click_out_of_range_ignored() {
    let (_, json) = run_json("trio.json", "type:al,click:5", &[]);
    assert_eq!(json["state"]["open"], true);
    assert_eq!(json["state"]["input_text"], "al");
}

#[test]
fn test_records_swap_clamps_active_index() {
    let shrunk = super::common::fixture("shrunk.json");
    let events = format!("type:al,key:ctrl+down,records:{shrunk},assert:state:active_index=2");
    let (code, json) = run_json("many.json", &events, &[]);
    assert_eq!(code, 0, "{json}");
    assert_eq!(json["state"]["match_count"], 2);
    assert_eq!(json["state"]["record_count"], 3);
}

#[test]
fn test_legacy_flag() {
    let (code, json) = run_json(
        "many.json",
        "type:al,key:ctrl+down,assert:state:active_index=2,assert:state:input_text=al",
        &["--legacy"],
    );
    assert_eq!(code, 0, "{json}");
}

#[test]
fn test_commit_clear_mode() {
    let (_, json) = run_json("trio.json", "type:bo,key:enter", &["--commit", "clear"]);
    assert_eq!(json["state"]["input_text"], "");
    assert_eq!(json["state"]["last_commit"], "Bob");
}

#[test]
fn test_label_field_option() {
    let (_, json) = run_json("trio.json", "type:bob@", &["--label", "email"]);
    assert_eq!(json["state"]["match_count"], 1);
    assert_eq!(json["semantics"]["options"][0]["label"], "bob@example.com");
}

#[test]
fn test_single_listener_while_running() {
    let (code, json) = run_json("trio.json", "type:a,assert:state:listeners=1", &[]);
    assert_eq!(code, 0, "{json}");
    assert_eq!(json["state"]["listeners"], 0);
}
