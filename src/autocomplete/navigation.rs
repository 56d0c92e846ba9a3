//! Autocomplete navigation state machine.
//!
//! The widget is Closed while there are no matches and Open otherwise. Every
//! mutation recomputes what depends on it right away: editing the text
//! re-filters, moving the active index scrolls it into view and previews its
//! label in the field.

use std::ops::Range;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::filter::filter_indices;
use super::record::LabelSelector;
use super::scroll::ListViewport;
use super::semantics::ListboxSemantics;
use super::text_field::TextField;

/// What a commit writes into the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    /// The committed record's label.
    #[default]
    Label,
    /// Nothing; the field is emptied.
    Clear,
}

impl std::str::FromStr for CommitMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "label" => Ok(Self::Label),
            "clear" => Ok(Self::Clear),
            _ => Err(format!("Invalid commit mode: {s}. Expected: label or clear")),
        }
    }
}

/// Behaviour switches for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    /// Write the active label into the field while navigating.
    pub preview_on_navigate: bool,
    /// Ctrl/Meta + arrows jump to the first or last match.
    pub jump_keys: bool,
    /// Keep the active entry inside the visible rows.
    pub scroll_into_view: bool,
    /// What Enter or a click writes into the field.
    pub commit: CommitMode,
    /// Rows of the options list visible at once.
    pub max_visible: usize,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            preview_on_navigate: true,
            jump_keys: true,
            scroll_into_view: true,
            commit: CommitMode::Label,
            max_visible: 8,
        }
    }
}

impl WidgetOptions {
    /// The simpler behaviour: no preview, no jump keys, no scroll adjustment.
    pub fn legacy() -> Self {
        Self {
            preview_on_navigate: false,
            jump_keys: false,
            scroll_into_view: false,
            ..Self::default()
        }
    }
}

/// Observable result of feeding one input to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The input means nothing in the current state.
    Ignored,
    /// The text changed and the matches were recomputed.
    Edited,
    /// Only the cursor moved.
    CursorMoved,
    /// The active index moved.
    Navigated,
    /// A record was committed; carries its label.
    Committed(String),
    /// The list was closed without committing.
    Cancelled,
}

/// Typeahead state for one mounted widget.
#[derive(Debug)]
pub struct Autocomplete<R, S> {
    records: Vec<R>,
    selector: S,
    options: WidgetOptions,
    field: TextField,
    query: String,
    /// Positions into `records`, in collection order.
    matches: Vec<usize>,
    /// 1-based; only meaningful while `matches` is non-empty.
    active: usize,
    viewport: ListViewport,
    focused: bool,
    mounted: bool,
}

impl<R, S> Autocomplete<R, S>
where
    S: LabelSelector<R>,
{
    /// Creates a widget with the default behaviour.
    pub fn new(records: Vec<R>, selector: S) -> Self {
        Self::with_options(records, selector, WidgetOptions::default())
    }

    /// Creates a widget with explicit behaviour options.
    pub fn with_options(records: Vec<R>, selector: S, options: WidgetOptions) -> Self {
        let viewport = ListViewport::new(options.max_visible.max(1), 1);
        Self {
            records,
            selector,
            options,
            field: TextField::new(),
            query: String::new(),
            matches: Vec::new(),
            active: 1,
            viewport,
            focused: false,
            mounted: false,
        }
    }

    /// Marks the widget as mounted and focuses the input.
    ///
    /// Focus is applied only on the first call; returns whether it was.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.focused = true;
        debug!("autocomplete mounted, input focused");
        true
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// Current contents of the text field.
    pub fn text(&self) -> &str {
        self.field.text()
    }

    /// Cursor position in the text field, in characters.
    pub fn cursor(&self) -> usize {
        self.field.cursor()
    }

    /// The text the current matches were computed from.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Matching records in display order.
    pub fn matches(&self) -> impl Iterator<Item = &R> + '_ {
        self.matches.iter().map(|&idx| &self.records[idx])
    }

    /// Labels of the matching records in display order.
    pub fn match_labels(&self) -> Vec<String> {
        self.matches().map(|r| self.selector.label(r)).collect()
    }

    /// 1-based active position, or `None` while Closed.
    pub fn active_index(&self) -> Option<usize> {
        self.is_open().then_some(self.active)
    }

    pub fn active_record(&self) -> Option<&R> {
        self.active_index()
            .and_then(|pos| self.matches.get(pos - 1))
            .map(|&idx| &self.records[idx])
    }

    pub fn label_of(&self, record: &R) -> String {
        self.selector.label(record)
    }

    pub fn scroll_offset(&self) -> usize {
        self.viewport.offset()
    }

    pub fn visible_rows(&self) -> usize {
        self.viewport.visible_height()
    }

    /// Tells the widget how many rows the list actually got on screen.
    ///
    /// Capped at `max_visible`. When the height changes while Open, the
    /// active entry is scrolled back into the new window.
    pub fn set_visible_rows(&mut self, rows: usize) {
        let rows = rows.min(self.options.max_visible.max(1));
        if rows == self.viewport.visible_height() {
            return;
        }
        self.viewport.set_visible_height(rows);
        self.viewport.clamp_to(self.matches.len());
        if self.options.scroll_into_view {
            if let Some(pos) = self.active_index() {
                self.viewport.reveal(pos - 1);
            }
        }
        debug!(rows, scroll = self.viewport.offset(), "autocomplete window resized");
    }

    /// 0-based match positions currently inside the list's window.
    pub fn visible_range(&self) -> Range<usize> {
        self.viewport.visible_range(self.matches.len())
    }

    /// Returns true if the active entry is fully inside the list's window.
    pub fn active_is_visible(&self) -> bool {
        self.active_index()
            .is_some_and(|pos| self.viewport.is_visible(pos - 1))
    }

    pub fn semantics(&self) -> ListboxSemantics {
        ListboxSemantics::new(self.match_labels(), self.active_index())
    }

    /// Interprets one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        let jump = self.options.jump_keys
            && key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META);

        match key.code {
            KeyCode::Down if self.is_open() => {
                let len = self.matches.len();
                let current = self.active.clamp(1, len);
                let next = if jump {
                    len
                } else if current >= len {
                    1
                } else {
                    current + 1
                };
                self.navigate_to(next)
            }
            KeyCode::Up if self.is_open() => {
                let len = self.matches.len();
                let current = self.active.clamp(1, len);
                let next = if jump {
                    1
                } else if current <= 1 {
                    len
                } else {
                    current - 1
                };
                self.navigate_to(next)
            }
            KeyCode::Enter if self.is_open() => self.commit_at(self.active),
            KeyCode::Esc if self.is_open() => {
                self.close();
                debug!(text = %self.field.text(), "autocomplete cancelled");
                Outcome::Cancelled
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input_char(c)
            }
            KeyCode::Backspace => {
                if self.field.backspace() {
                    self.refilter();
                    Outcome::Edited
                } else {
                    Outcome::Ignored
                }
            }
            KeyCode::Delete => {
                if self.field.delete() {
                    self.refilter();
                    Outcome::Edited
                } else {
                    Outcome::Ignored
                }
            }
            KeyCode::Left => {
                self.field.move_left();
                Outcome::CursorMoved
            }
            KeyCode::Right => {
                self.field.move_right();
                Outcome::CursorMoved
            }
            KeyCode::Home => {
                self.field.move_home();
                Outcome::CursorMoved
            }
            KeyCode::End => {
                self.field.move_end();
                Outcome::CursorMoved
            }
            _ => Outcome::Ignored,
        }
    }

    /// Types one character at the cursor.
    ///
    /// The field may be showing a previewed label; the character edits what
    /// is displayed and the query becomes the field's new contents.
    pub fn input_char(&mut self, c: char) -> Outcome {
        self.field.insert(c);
        self.refilter();
        Outcome::Edited
    }

    /// Replaces the whole field, as a paste or an external change would.
    pub fn set_text(&mut self, text: impl Into<String>) -> Outcome {
        self.field.set(text);
        self.refilter();
        Outcome::Edited
    }

    /// Pointer activation of the entry at 1-based `position`.
    pub fn click(&mut self, position: usize) -> Outcome {
        if position == 0 || position > self.matches.len() {
            return Outcome::Ignored;
        }
        self.commit_at(position)
    }

    /// Replaces the record collection.
    ///
    /// While Open, the matches are recomputed for the current query and the
    /// active index is clamped into the new bounds. While Closed, the new
    /// collection is used from the next edit on.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        debug!(count = self.records.len(), "autocomplete records replaced");

        if !self.is_open() {
            return;
        }

        self.matches = filter_indices(&self.records, &self.query, &self.selector);
        if self.matches.is_empty() {
            self.close();
            return;
        }

        let clamped = self.active.clamp(1, self.matches.len());
        if clamped != self.active {
            debug!(from = self.active, to = clamped, "active index clamped");
        }
        self.active = clamped;
        self.viewport.clamp_to(self.matches.len());
        if self.options.scroll_into_view {
            self.viewport.reveal(self.active - 1);
        }
    }

    fn refilter(&mut self) {
        self.query = self.field.text().to_string();
        self.matches = filter_indices(&self.records, &self.query, &self.selector);
        self.active = 1;
        self.viewport.reset();
        debug!(query = %self.query, matches = self.matches.len(), "autocomplete refiltered");
    }

    fn navigate_to(&mut self, position: usize) -> Outcome {
        self.active = position;

        if self.options.scroll_into_view {
            self.viewport.reveal(position - 1);
        }

        if self.options.preview_on_navigate {
            if let Some(label) = self.active_record().map(|r| self.selector.label(r)) {
                self.field.set(label);
            }
        }

        debug!(active = self.active, scroll = self.viewport.offset(), "autocomplete navigated");
        Outcome::Navigated
    }

    fn commit_at(&mut self, position: usize) -> Outcome {
        let label = match self.matches.get(position - 1) {
            Some(&idx) => self.selector.label(&self.records[idx]),
            None => return Outcome::Ignored,
        };

        match self.options.commit {
            CommitMode::Label => self.field.set(label.clone()),
            CommitMode::Clear => self.field.clear(),
        }
        self.close();
        debug!(label = %label, "autocomplete committed");
        Outcome::Committed(label)
    }

    fn close(&mut self) {
        self.matches.clear();
        self.active = 1;
        self.viewport.reset();
    }
}
