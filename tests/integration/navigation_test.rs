//! Navigation properties of the widget core.

use super::named;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use typeahead::autocomplete::{
    filter, FieldSelector, Outcome, RecordAutocomplete, WidgetOptions,
};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

fn widget(names: &[&str], options: WidgetOptions) -> RecordAutocomplete {
    RecordAutocomplete::with_options(named(names), FieldSelector::new("name"), options)
}

fn type_text(w: &mut RecordAutocomplete, text: &str) {
    for c in text.chars() {
        w.handle_key(key(KeyCode::Char(c)));
    }
}

/// Deterministic key sequence; 0 = Down, 1 = Up, 2 = Ctrl+Down, 3 = Ctrl+Up.
fn key_sequence(seed: u64, len: usize) -> Vec<KeyEvent> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            match (state >> 33) % 4 {
                0 => key(KeyCode::Down),
                1 => key(KeyCode::Up),
                2 => ctrl(KeyCode::Down),
                _ => ctrl(KeyCode::Up),
            }
        })
        .collect()
}

const MANY: &[&str] = &[
    "Alice", "Albert", "Alberta", "Alfred", "Alma", "Alvin", "Alonzo", "Alex", "Alexis", "Bob",
];

#[test]
fn test_example_scenario() {
    let mut w = widget(&["Alice", "Albert", "Bob"], WidgetOptions::default());

    type_text(&mut w, "al");
    assert_eq!(w.match_labels(), vec!["Alice", "Albert"]);
    assert_eq!(w.active_index(), Some(1));
    assert_eq!(w.text(), "al");

    w.handle_key(key(KeyCode::Down));
    assert_eq!((w.active_index(), w.text()), (Some(2), "Albert"));

    w.handle_key(key(KeyCode::Down));
    assert_eq!((w.active_index(), w.text()), (Some(1), "Alice"));

    assert_eq!(
        w.handle_key(key(KeyCode::Enter)),
        Outcome::Committed("Alice".to_string())
    );
    assert_eq!(w.text(), "Alice");
    assert!(!w.is_open());
    assert_eq!(w.active_index(), None);
}

#[test]
fn test_filter_is_case_insensitive_substring() {
    let records = named(&["Alice", "ALBERT", "Bob", "Sal"]);
    let selector = FieldSelector::new("name");
    let labels: Vec<&str> = filter(&records, "AL", &selector)
        .into_iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert_eq!(labels, vec!["Alice", "ALBERT", "Sal"]);
    assert!(filter(&records, "", &selector).is_empty());
}

#[test]
fn test_active_index_stays_in_bounds() {
    for seed in 0..32 {
        let mut w = widget(MANY, WidgetOptions::default());
        type_text(&mut w, "al");
        let len = w.match_count();
        assert_eq!(len, 9);

        for k in key_sequence(seed, 40) {
            w.handle_key(k);
            let active = w.active_index().expect("list stays open while navigating");
            assert!((1..=len).contains(&active), "seed {seed}: {active} out of 1..={len}");
        }
    }
}

#[test]
fn test_scroll_contains_active_after_every_move() {
    let options = WidgetOptions {
        max_visible: 3,
        ..WidgetOptions::default()
    };
    for seed in 0..32 {
        let mut w = widget(MANY, options.clone());
        type_text(&mut w, "al");
        for k in key_sequence(seed, 40) {
            w.handle_key(k);
            assert!(w.active_is_visible(), "seed {seed}: active entry scrolled out");
            assert!(w.visible_range().len() <= 3);
        }
    }
}

#[test]
fn test_wraps_at_both_ends() {
    let mut w = widget(MANY, WidgetOptions::default());
    type_text(&mut w, "al");

    w.handle_key(key(KeyCode::Up));
    assert_eq!(w.active_index(), Some(9));
    w.handle_key(key(KeyCode::Down));
    assert_eq!(w.active_index(), Some(1));
}

#[test]
fn test_jump_keys_reach_ends() {
    let mut w = widget(MANY, WidgetOptions::default());
    type_text(&mut w, "al");

    w.handle_key(ctrl(KeyCode::Down));
    assert_eq!(w.active_index(), Some(9));
    assert_eq!(w.text(), "Alexis");

    w.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::META));
    assert_eq!(w.active_index(), Some(1));
    assert_eq!(w.text(), "Alice");
}

#[test]
fn test_enter_and_click_commit_identically() {
    for steps in 0..4 {
        let mut by_key = widget(MANY, WidgetOptions::default());
        let mut by_click = widget(MANY, WidgetOptions::default());
        for w in [&mut by_key, &mut by_click] {
            type_text(w, "al");
            for _ in 0..steps {
                w.handle_key(key(KeyCode::Down));
            }
        }

        let active = by_click.active_index().unwrap_or(1);
        let a = by_key.handle_key(key(KeyCode::Enter));
        let b = by_click.click(active);
        assert_eq!(a, b);
        assert_eq!(by_key.text(), by_click.text());
        assert_eq!(by_key.is_open(), by_click.is_open());
    }
}

#[test]
fn test_cancel_preserves_text() {
    let mut w = widget(MANY, WidgetOptions::default());
    type_text(&mut w, "alf");
    assert_eq!(w.handle_key(key(KeyCode::Esc)), Outcome::Cancelled);
    assert_eq!(w.text(), "alf");
    assert!(!w.is_open());
}

#[test]
fn test_shrinking_collection_clamps_active_index() {
    let mut w = widget(MANY, WidgetOptions::default());
    type_text(&mut w, "al");
    w.handle_key(ctrl(KeyCode::Down));
    assert_eq!(w.active_index(), Some(9));

    w.set_records(named(&["Alice", "Albert", "Bob"]));
    assert_eq!(w.match_count(), 2);
    assert_eq!(w.active_index(), Some(2));
    assert!(w.active_is_visible());
}

#[test]
fn test_semantics_snapshot() {
    let mut w = widget(&["Alice", "Albert", "Bob"], WidgetOptions::default());
    type_text(&mut w, "al");
    w.handle_key(key(KeyCode::Down));

    let value = serde_json::to_value(w.semantics()).unwrap();
    assert_eq!(value["role"], "combobox");
    assert_eq!(value["autocomplete"], "list");
    assert_eq!(value["expanded"], true);
    assert_eq!(value["controls"], "typeahead-listbox");
    assert_eq!(value["active_descendant"], "typeahead-option-2");
    assert_eq!(value["options"][0]["role"], "option");
    assert_eq!(value["options"][1]["label"], "Albert");
}
