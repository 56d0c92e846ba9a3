//! Listbox semantics exposed to assistive front ends.
//!
//! Mirrors the combobox/listbox/option roles a screen reader expects, so a
//! renderer (or a test) can read them without inspecting widget internals.

use serde::Serialize;

/// Id of the options list controlled by the input.
pub const LISTBOX_ID: &str = "typeahead-listbox";

/// Returns the id of the option at 1-based `position`.
pub fn option_id(position: usize) -> String {
    format!("typeahead-option-{position}")
}

/// Snapshot of the input's combobox attributes and its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListboxSemantics {
    pub role: &'static str,
    pub autocomplete: &'static str,
    pub expanded: bool,
    pub controls: &'static str,
    pub active_descendant: Option<String>,
    pub options: Vec<OptionSemantics>,
}

/// One entry of the options list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSemantics {
    pub id: String,
    pub role: &'static str,
    pub label: String,
    pub selected: bool,
}

impl ListboxSemantics {
    /// Builds the snapshot from the current labels and 1-based active position.
    pub fn new(labels: Vec<String>, active: Option<usize>) -> Self {
        let options: Vec<OptionSemantics> = labels
            .into_iter()
            .enumerate()
            .map(|(idx, label)| OptionSemantics {
                id: option_id(idx + 1),
                role: "option",
                label,
                selected: active == Some(idx + 1),
            })
            .collect();

        let expanded = !options.is_empty();
        Self {
            role: "combobox",
            autocomplete: "list",
            expanded,
            controls: LISTBOX_ID,
            active_descendant: active.filter(|_| expanded).map(option_id),
            options,
        }
    }
}
