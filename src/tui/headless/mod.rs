//! Headless mode for scripted testing and automation.
//!
//! Runs the TUI against an in-memory terminal, executing scripted events
//! and capturing output for verification.

mod events;
mod output;

pub use events::{Assertion, Event, EventParser};
pub use output::{HeadlessOutput, ScreenRenderer};

use crate::autocomplete::ListboxSemantics;
use crate::cli::{Cli, OutputFormat};
use crate::config::WidgetConfig;
use crate::error::{Result, TypeaheadError};
use crate::source::{FileSource, Fetcher, RecordSource};
use crate::tui::app::App;
use crate::tui::events::KeyboardScope;
use crate::tui::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Configuration for headless mode execution.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Screen width in columns.
    pub width: u16,
    /// Screen height in rows.
    pub height: u16,
    /// Output format.
    pub output_format: OutputFormat,
    /// Whether to stop on first assertion failure.
    pub fail_fast: bool,
    /// Path to write output (None = stdout).
    pub output_file: Option<std::path::PathBuf>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            output_format: OutputFormat::Text,
            fail_fast: false,
            output_file: None,
        }
    }
}

impl HeadlessConfig {
    /// Creates a HeadlessConfig from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (width, height) = cli.parse_screen_size().map_err(TypeaheadError::config)?;
        let output_format = cli.parse_output_format().map_err(TypeaheadError::config)?;

        Ok(Self {
            width,
            height,
            output_format,
            fail_fast: cli.fail_fast,
            output_file: cli.output_file.clone(),
        })
    }
}

/// Result of headless execution.
#[derive(Debug)]
pub struct HeadlessResult {
    /// Final screen content as text.
    pub screen: String,
    /// Screen lines for JSON output.
    pub screen_lines: Vec<String>,
    /// Number of events executed.
    pub events_executed: usize,
    /// Total execution duration.
    pub duration: Duration,
    /// Number of assertions passed.
    pub assertions_passed: usize,
    /// Number of assertions failed.
    pub assertions_failed: usize,
    /// Application state snapshot.
    pub state: HeadlessState,
    /// Listbox semantics at the end of the run.
    pub semantics: ListboxSemantics,
    /// Frame captures (for frames output mode).
    pub frames: Vec<Frame>,
}

/// Snapshot of application state for JSON output and state assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlessState {
    pub input_text: String,
    /// Text the current matches were computed from.
    pub query: String,
    pub open: bool,
    /// 1-based, 0 while the list is closed.
    pub active_index: usize,
    pub match_count: usize,
    pub record_count: usize,
    pub scroll_offset: usize,
    pub focused: bool,
    /// Live keyboard subscriptions.
    pub listeners: usize,
    pub running: bool,
    pub fetch_error: bool,
    pub last_commit: Option<String>,
}

impl HeadlessState {
    fn from_app(app: &App) -> Self {
        let widget = &app.widget;
        Self {
            input_text: widget.text().to_string(),
            query: widget.query().to_string(),
            open: widget.is_open(),
            active_index: widget.active_index().unwrap_or(0),
            match_count: widget.match_count(),
            record_count: widget.records().len(),
            scroll_offset: widget.scroll_offset(),
            focused: widget.is_focused(),
            listeners: app.listener_count(),
            running: app.running,
            fetch_error: app.fetch_error,
            last_commit: app.last_commit.clone(),
        }
    }

    /// Returns a field by name, formatted for comparison.
    pub fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "input_text" => self.input_text.clone(),
            "query" => self.query.clone(),
            "open" => self.open.to_string(),
            "active_index" => self.active_index.to_string(),
            "match_count" => self.match_count.to_string(),
            "record_count" => self.record_count.to_string(),
            "scroll_offset" => self.scroll_offset.to_string(),
            "focused" => self.focused.to_string(),
            "listeners" => self.listeners.to_string(),
            "running" => self.running.to_string(),
            "fetch_error" => self.fetch_error.to_string(),
            "last_commit" => self.last_commit.clone().unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }
}

/// A captured frame (screen state after an event).
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame number (0 = initial state).
    pub number: usize,
    /// Event that produced this frame (None for initial).
    pub event: Option<String>,
    /// Screen content.
    pub screen: String,
}

/// Runs the TUI in headless mode.
pub struct HeadlessRunner {
    config: HeadlessConfig,
    terminal: Terminal<TestBackend>,
    app: App,
    source: Option<Box<dyn RecordSource>>,
    fetcher: Fetcher,
    events: Vec<Event>,
    frames: Vec<Frame>,
    start_time: Instant,
    assertions_passed: usize,
    assertions_failed: usize,
}

impl HeadlessRunner {
    /// Creates a new headless runner with an empty record collection.
    pub fn new(config: HeadlessConfig, widget: &WidgetConfig) -> Result<Self> {
        let backend = TestBackend::new(config.width, config.height);
        let terminal = Terminal::new(backend).map_err(|e| {
            TypeaheadError::internal(format!("Failed to create test terminal: {e}"))
        })?;

        let app = App::new(widget, "none", KeyboardScope::new());

        Ok(Self {
            config,
            terminal,
            app,
            source: None,
            fetcher: Fetcher::new(),
            events: Vec::new(),
            frames: Vec::new(),
            start_time: Instant::now(),
            assertions_passed: 0,
            assertions_failed: 0,
        })
    }

    /// Sets the source fetched before the events run.
    pub fn with_source(mut self, source: Box<dyn RecordSource>) -> Self {
        self.app.source_label = source.location();
        self.source = Some(source);
        self
    }

    /// Loads events from a string (comma-separated or newline-separated).
    pub fn load_events(&mut self, input: &str) -> Result<()> {
        self.events = EventParser::new().parse_all(input)?;
        Ok(())
    }

    /// Loads events from a script file, or stdin for "-".
    pub fn load_script(&mut self, path: &str) -> Result<()> {
        let content = if path == "-" {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| TypeaheadError::internal(format!("Failed to read stdin: {e}")))?;
            buffer
        } else {
            std::fs::read_to_string(path).map_err(|e| {
                TypeaheadError::internal(format!("Failed to read script file: {e}"))
            })?
        };

        self.load_events(&content)
    }

    /// Runs the headless execution and returns the result.
    pub async fn run(mut self) -> Result<HeadlessResult> {
        self.start_time = Instant::now();

        if self.source.is_some() {
            self.app.begin_fetch();
        }

        // Initial frame: the widget is usable before any data arrives
        self.capture_frame(None)?;

        if let Some(source) = self.source.take() {
            let state = self.fetcher.fetch(source.as_ref()).await;
            self.app.apply_fetch(state);
        }

        let events = std::mem::take(&mut self.events);
        let mut events_executed = 0;

        for event in events {
            let event_str = event.to_string();

            match &event {
                Event::Key(key_event) => {
                    self.app.handle_key(*key_event);
                }
                Event::Type(text) => {
                    for c in text.chars() {
                        self.app
                            .handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
                    }
                }
                Event::Click(position) => {
                    self.app.click_option(*position);
                }
                Event::Records(path) => {
                    self.replace_records(path);
                }
                Event::Wait(duration) => {
                    tokio::time::sleep(*duration).await;
                }
                Event::Resize(w, h) => {
                    self.terminal
                        .resize(ratatui::layout::Rect::new(0, 0, *w, *h))
                        .map_err(|e| TypeaheadError::internal(format!("Resize failed: {e}")))?;
                }
                Event::Snapshot(name) => {
                    info!(name, "snapshot");
                }
                Event::Assert(assertion) => {
                    self.draw()?;
                    let screen = self.render_screen();
                    let state = HeadlessState::from_app(&self.app);
                    if assertion.check(&screen, &state) {
                        self.assertions_passed += 1;
                    } else {
                        warn!(assertion = %event_str, "assertion failed");
                        self.assertions_failed += 1;
                        if self.config.fail_fast {
                            events_executed += 1;
                            break;
                        }
                    }
                }
            }

            events_executed += 1;

            self.draw()?;

            if self.config.output_format == OutputFormat::Frames {
                self.capture_frame(Some(event_str))?;
            }

            if !self.app.running {
                break;
            }
        }

        self.app.unmount();
        self.draw()?;

        let screen = self.render_screen();
        let screen_lines = screen.lines().map(String::from).collect();

        Ok(HeadlessResult {
            screen,
            screen_lines,
            events_executed,
            duration: self.start_time.elapsed(),
            assertions_passed: self.assertions_passed,
            assertions_failed: self.assertions_failed,
            state: HeadlessState::from_app(&self.app),
            semantics: self.app.widget.semantics(),
            frames: self.frames,
        })
    }

    /// Replaces the collection from a JSON file; a bad file only raises the
    /// error flag.
    fn replace_records(&mut self, path: &Path) {
        match FileSource::new(path).load_blocking() {
            Ok(records) => {
                self.app.fetch_error = false;
                self.app.set_records(records);
            }
            Err(e) => {
                warn!("Failed to load records from {}: {}", path.display(), e);
                self.app.fetch_error = true;
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        self.terminal
            .draw(|frame| ui::render(frame, &mut self.app))
            .map_err(|e| TypeaheadError::internal(format!("Failed to render: {e}")))?;
        Ok(())
    }

    /// Renders the current screen to a string.
    fn render_screen(&self) -> String {
        ScreenRenderer::render(self.terminal.backend().buffer())
    }

    /// Captures the current frame.
    fn capture_frame(&mut self, event: Option<String>) -> Result<()> {
        self.draw()?;

        let screen = self.render_screen();
        let number = self.frames.len();

        self.frames.push(Frame {
            number,
            event,
            screen,
        });

        Ok(())
    }
}

/// Runs headless mode from CLI arguments and the resolved settings.
pub async fn run_headless(
    cli: &Cli,
    widget: &WidgetConfig,
    source: Box<dyn RecordSource>,
) -> Result<i32> {
    cli.validate_headless().map_err(TypeaheadError::config)?;

    let config = HeadlessConfig::from_cli(cli)?;
    let mut runner = HeadlessRunner::new(config.clone(), widget)?.with_source(source);

    if let Some(ref events_str) = cli.events {
        runner.load_events(events_str)?;
    } else if let Some(ref script_path) = cli.script {
        runner.load_script(script_path)?;
    }

    let result = runner.run().await?;

    let output_str = HeadlessOutput::new(config.output_format).format(&result);

    if let Some(ref path) = config.output_file {
        std::fs::write(path, &output_str).map_err(|e| {
            TypeaheadError::internal(format!("Failed to write output file: {e}"))
        })?;
    } else {
        print!("{output_str}");
    }

    if result.assertions_failed > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}
