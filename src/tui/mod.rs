//! Terminal User Interface for typeahead.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
pub mod events;
pub mod headless;
mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler, KeySubscription, KeyboardScope};

use crate::config::WidgetConfig;
use crate::error::{Result, TypeaheadError};
use crate::source::{FetchState, Fetcher, RecordSource};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Messages sent from background tasks to the main loop.
#[derive(Debug)]
pub enum AsyncMessage {
    /// The record fetch finished.
    Fetched(FetchState),
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
    /// Flag to signal cancellation of pending operations.
    shutdown_flag: Arc<AtomicBool>,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
            shutdown_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns a clone of the shutdown flag for use in async tasks.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown_flag)
    }

    /// Signals shutdown to all pending operations.
    pub fn signal_shutdown(&self) {
        self.shutdown_flag.store(true, Ordering::SeqCst);
    }

    /// Checks if shutdown has been signaled.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| TypeaheadError::terminal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
            TypeaheadError::terminal(format!("Failed to enter alternate screen: {e}"))
        })?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
            .map_err(|e| TypeaheadError::terminal(format!("Failed to create terminal: {e}")))
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| TypeaheadError::terminal(format!("Failed to disable raw mode: {e}")))?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| TypeaheadError::terminal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| TypeaheadError::terminal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the interactive loop. Records are fetched in the background and
    /// applied when they arrive; the widget is usable before that.
    pub async fn run(&mut self, widget: &WidgetConfig, source: Box<dyn RecordSource>) -> Result<()> {
        let original_hook = panic::take_hook();
        let shutdown_flag = self.shutdown_flag();
        panic::set_hook(Box::new(move |panic_info| {
            shutdown_flag.store(true, Ordering::SeqCst);
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let keys = KeyboardScope::new();
        let mut app_state = App::new(widget, source.location(), keys.clone());
        app_state.begin_fetch();

        let (tx, mut rx) = mpsc::channel::<AsyncMessage>(4);
        let fetch_task = tokio::spawn(async move {
            let mut fetcher = Fetcher::new();
            let state = fetcher.fetch(source.as_ref()).await.clone();
            // The loop may already be gone
            let _ = tx.send(AsyncMessage::Fetched(state)).await;
        });

        let handler = self.event_handler;
        let (mut events, reader) = spawn_event_reader(move || handler.next(), self.shutdown_flag());

        let result = self.run_event_loop(&mut app_state, &mut events, &mut rx).await;

        app_state.unmount();
        fetch_task.abort();
        self.signal_shutdown();
        // Dropping the receiver also stops the reader at its next poll
        drop(events);
        if let Err(e) = reader.await {
            warn!("event reader task failed: {}", e);
        }
        debug!(listeners = keys.len(), "event loop finished");

        let _ = panic::take_hook();

        result
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(
        &mut self,
        app_state: &mut App,
        events: &mut mpsc::Receiver<Result<Event>>,
        rx: &mut mpsc::Receiver<AsyncMessage>,
    ) -> Result<()> {
        loop {
            self.terminal
                .draw(|frame| ui::render(frame, app_state))
                .map_err(|e| TypeaheadError::terminal(format!("Failed to draw: {e}")))?;

            if !app_state.running || self.is_shutdown() {
                break;
            }

            tokio::select! {
                Some(event) = events.recv() => {
                    app_state.handle_event(event?);
                }

                Some(msg) = rx.recv() => {
                    Self::handle_async_message(msg, app_state);
                }

                else => break,
            }
        }

        Ok(())
    }

    /// Handles a message from a background task.
    fn handle_async_message(msg: AsyncMessage, app_state: &mut App) {
        match msg {
            AsyncMessage::Fetched(state) => {
                info!(records = state.data.len(), error = state.error, "fetch applied");
                app_state.apply_fetch(&state);
            }
        }
    }
}

/// Reads events on a blocking thread and forwards them in order.
///
/// The reader owns the poll for its whole life, so an event it has read is
/// always delivered. It stops after a read error. It also stops at its next
/// poll once `shutdown` is set or the receiver is dropped.
fn spawn_event_reader<F>(
    mut next: F,
    shutdown: Arc<AtomicBool>,
) -> (mpsc::Receiver<Result<Event>>, tokio::task::JoinHandle<()>)
where
    F: FnMut() -> Result<Event> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(64);
    let reader = tokio::task::spawn_blocking(move || {
        while !shutdown.load(Ordering::SeqCst) {
            let event = next();
            let failed = event.is_err();
            if tx.blocking_send(event).is_err() || failed {
                break;
            }
        }
        debug!("event reader stopped");
    });
    (rx, reader)
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the interactive TUI.
pub async fn run(widget: &WidgetConfig, source: Box<dyn RecordSource>) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.run(widget, source).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    fn key_char(event: &Event) -> Option<char> {
        match event {
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                ..
            }) => Some(*c),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_event_reader_delivers_every_event_in_order() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&shutdown);
        let mut pending: VecDeque<Event> = "abc"
            .chars()
            .map(|c| Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
            .collect();
        let (mut events, reader) = spawn_event_reader(
            move || match pending.pop_front() {
                Some(event) => Ok(event),
                None => {
                    stop.store(true, Ordering::SeqCst);
                    Ok(Event::Tick)
                }
            },
            shutdown,
        );

        // A competing channel that is always ready wins the first rounds
        let (busy_tx, mut busy) = mpsc::channel::<()>(8);
        for _ in 0..5 {
            busy_tx.try_send(()).unwrap();
        }
        drop(busy_tx);

        let mut received = Vec::new();
        loop {
            tokio::select! {
                biased;
                Some(()) = busy.recv() => {}
                Some(event) = events.recv() => received.push(event.unwrap()),
                else => break,
            }
        }
        reader.await.unwrap();

        let typed: String = received.iter().filter_map(key_char).collect();
        assert_eq!(typed, "abc");
        assert!(matches!(received.last(), Some(Event::Tick)));
    }

    #[tokio::test]
    async fn test_event_reader_stops_after_error() {
        let (mut events, reader) = spawn_event_reader(
            || Err(TypeaheadError::terminal("poll failed")),
            Arc::new(AtomicBool::new(false)),
        );

        assert!(events.recv().await.unwrap().is_err());
        assert!(events.recv().await.is_none());
        reader.await.unwrap();
    }

    #[tokio::test]
    async fn test_event_reader_stops_when_receiver_dropped() {
        let (events, reader) =
            spawn_event_reader(|| Ok(Event::Tick), Arc::new(AtomicBool::new(false)));
        drop(events);
        reader.await.unwrap();
    }
}
