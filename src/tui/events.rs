//! Event handling for the TUI.
//!
//! Polls crossterm for terminal events and tracks which components are
//! subscribed to keyboard input.

use crate::error::{Result, TypeaheadError};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tracing::debug;

/// Application events.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse button or wheel event.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A periodic tick.
    Tick,
}

impl Event {
    /// Converts a crossterm event, dropping key releases and repeats.
    pub fn from_crossterm(event: CrosstermEvent) -> Self {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Self::Key(key),
            CrosstermEvent::Mouse(mouse) => Self::Mouse(mouse),
            CrosstermEvent::Resize(width, height) => Self::Resize(width, height),
            _ => Self::Tick,
        }
    }
}

/// Handles terminal events.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    /// Timeout for polling events.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new event handler with default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Creates a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Polls for the next event, returning `Tick` if none arrives in time.
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)
            .map_err(|e| TypeaheadError::terminal(format!("Failed to poll events: {e}")))?
        {
            let event = event::read()
                .map_err(|e| TypeaheadError::terminal(format!("Failed to read event: {e}")))?;
            Ok(Event::from_crossterm(event))
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

type LiveSet = Mutex<Vec<u64>>;

/// Registry of live keyboard subscriptions.
///
/// Keys are delivered to a component only while it holds a live
/// [`KeySubscription`]. Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct KeyboardScope {
    live: Arc<LiveSet>,
    next_id: Arc<AtomicU64>,
}

impl KeyboardScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; it stays registered until the guard is dropped.
    pub fn subscribe(&self, owner: &'static str) -> KeySubscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        lock(&self.live).push(id);
        debug!(owner, id, "keyboard subscription acquired");
        KeySubscription {
            id,
            owner,
            live: Arc::downgrade(&self.live),
        }
    }

    pub fn is_live(&self, subscription: &KeySubscription) -> bool {
        lock(&self.live).contains(&subscription.id)
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        lock(&self.live).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock(live: &LiveSet) -> std::sync::MutexGuard<'_, Vec<u64>> {
    live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Guard for one keyboard listener; deregisters on drop.
#[derive(Debug)]
pub struct KeySubscription {
    id: u64,
    owner: &'static str,
    live: Weak<LiveSet>,
}

impl KeySubscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        if let Some(live) = self.live.upgrade() {
            lock(&live).retain(|&id| id != self.id);
        }
        debug!(owner = self.owner, id = self.id, "keyboard subscription released");
    }
}
