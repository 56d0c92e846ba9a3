//! Application state for the TUI.
//!
//! Owns the mounted autocomplete widget, its keyboard subscription and the
//! status of the record fetch.

use crate::autocomplete::{FieldSelector, Outcome, RecordAutocomplete};
use crate::config::WidgetConfig;
use crate::source::FetchState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use serde_json::Value;
use tracing::{debug, info};

use super::events::{Event, KeyboardScope, KeySubscription};

/// Owner name used for the widget's keyboard subscription.
const WIDGET_OWNER: &str = "autocomplete";

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// The typeahead widget.
    pub widget: RecordAutocomplete,
    /// Where records come from, for display.
    pub source_label: String,
    /// A fetch is in flight.
    pub loading: bool,
    /// The last fetch failed.
    pub fetch_error: bool,
    /// Label of the most recent commit.
    pub last_commit: Option<String>,
    /// Outcome of the most recent input.
    pub last_outcome: Outcome,
    /// Screen area of the options list, including its border.
    pub list_area: Option<Rect>,
    keys: KeyboardScope,
    subscription: Option<KeySubscription>,
}

impl App {
    /// Creates the app and mounts the widget: it is focused and subscribed
    /// to keyboard input right away.
    pub fn new(config: &WidgetConfig, source_label: impl Into<String>, keys: KeyboardScope) -> Self {
        let mut widget = RecordAutocomplete::with_options(
            Vec::new(),
            FieldSelector::new(config.label.clone()),
            config.to_options(),
        );
        widget.mount();
        let subscription = Some(keys.subscribe(WIDGET_OWNER));

        Self {
            running: true,
            widget,
            source_label: source_label.into(),
            loading: false,
            fetch_error: false,
            last_commit: None,
            last_outcome: Outcome::Ignored,
            list_area: None,
            keys,
            subscription,
        }
    }

    /// Handles an event and updates application state.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                self.handle_key(key);
            }
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
            }
            Event::Resize(_, _) => {
                // Terminal resize is handled automatically by ratatui
            }
            Event::Tick => {}
        }
    }

    /// Handles a key press. Global shortcuts first, then the widget.
    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            info!("quit requested");
            self.running = false;
            return Outcome::Ignored;
        }

        if !self.has_keyboard() {
            debug!(code = ?key.code, "key dropped, widget not subscribed");
            return Outcome::Ignored;
        }

        let outcome = self.widget.handle_key(key);
        self.record(outcome)
    }

    /// Handles a mouse event; a left click on an option row commits it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Outcome {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Outcome::Ignored;
        }
        match self.option_at(mouse.column, mouse.row) {
            Some(position) => self.click_option(position),
            None => Outcome::Ignored,
        }
    }

    /// Commits the option at 1-based `position`, as a click would.
    pub fn click_option(&mut self, position: usize) -> Outcome {
        let outcome = self.widget.click(position);
        self.record(outcome)
    }

    /// Maps a screen cell to the 1-based option rendered there.
    pub fn option_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area?;
        // Rows inside the border
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        if column < inner.x
            || column >= inner.x + inner.width
            || row < inner.y
            || row >= inner.y + inner.height
        {
            return None;
        }

        let visible = self.widget.visible_range();
        let offset = usize::from(row - inner.y);
        (offset < visible.len()).then(|| visible.start + offset + 1)
    }

    /// Marks a fetch as started.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.fetch_error = false;
    }

    /// Applies the state of a finished fetch. A failed fetch leaves the
    /// widget's collection untouched.
    pub fn apply_fetch(&mut self, state: &FetchState) {
        self.loading = state.loading;
        self.fetch_error = state.error;
        if !state.error {
            self.set_records(state.data.clone());
        }
    }

    /// Replaces the widget's records.
    pub fn set_records(&mut self, records: Vec<Value>) {
        self.widget.set_records(records);
    }

    /// Returns true if key events currently reach the widget.
    pub fn has_keyboard(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|sub| self.keys.is_live(sub))
    }

    /// Number of live keyboard listeners.
    pub fn listener_count(&self) -> usize {
        self.keys.len()
    }

    /// Releases the widget's keyboard subscription.
    pub fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            debug!("widget unmounted");
        }
    }

    /// Re-acquires the keyboard subscription after an unmount.
    pub fn remount(&mut self) {
        if self.subscription.is_none() {
            self.subscription = Some(self.keys.subscribe(WIDGET_OWNER));
        }
    }

    fn record(&mut self, outcome: Outcome) -> Outcome {
        if let Outcome::Committed(label) = &outcome {
            info!(label = %label, "record selected");
            self.last_commit = Some(label.clone());
        }
        self.last_outcome = outcome.clone();
        outcome
    }
}
