//! Typeahead core: filtering, keyboard navigation and list scrolling.
//!
//! The core is independent of any terminal. It takes records and a label
//! selector, reacts to keys, clicks and collection updates, and exposes the
//! state a renderer needs.

pub mod filter;
pub mod navigation;
pub mod record;
pub mod scroll;
pub mod semantics;
mod text_field;

pub use filter::{filter, filter_indices};
pub use navigation::{Autocomplete, CommitMode, Outcome, WidgetOptions};
pub use record::{coerce_to_string, FieldSelector, LabelSelector, MISSING_LABEL};
pub use scroll::{scroll_into_view, Extent, ListViewport, Viewport};
pub use semantics::{ListboxSemantics, OptionSemantics, LISTBOX_ID};
pub use text_field::TextField;

/// Autocomplete over JSON object records, labelled by a field name.
pub type RecordAutocomplete = Autocomplete<serde_json::Value, FieldSelector>;
