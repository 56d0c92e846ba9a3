//! Output formatting for headless mode.
//!
//! Text prints the final screen, JSON adds the state and listbox semantics,
//! frames prints every captured screen in order.

use super::{HeadlessResult, HeadlessState};
use crate::autocomplete::ListboxSemantics;
use crate::cli::OutputFormat;
use ratatui::buffer::Buffer;
use serde::Serialize;

/// Renders a ratatui buffer to a string.
pub struct ScreenRenderer;

impl ScreenRenderer {
    /// Renders a buffer to plain text with trailing blanks removed.
    pub fn render(buffer: &Buffer) -> String {
        let area = buffer.area;
        if area.height == 0 {
            return "\n".to_string();
        }

        let mut lines: Vec<String> = (0..area.height)
            .map(|y| {
                let line: String = (0..area.width)
                    .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                    .collect();
                line.trim_end_matches(' ').to_string()
            })
            .collect();

        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        format!("{}\n", lines.join("\n"))
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    screen: &'a str,
    screen_lines: &'a [String],
    events_executed: usize,
    duration_ms: u64,
    assertions: AssertionSummary,
    state: &'a HeadlessState,
    semantics: &'a ListboxSemantics,
}

#[derive(Debug, Serialize)]
struct AssertionSummary {
    passed: usize,
    failed: usize,
}

/// Formats headless execution results.
pub struct HeadlessOutput {
    format: OutputFormat,
}

impl HeadlessOutput {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the result according to the configured format.
    pub fn format(&self, result: &HeadlessResult) -> String {
        match self.format {
            OutputFormat::Text => Self::format_text(result),
            OutputFormat::Json => Self::format_json(result),
            OutputFormat::Frames => Self::format_frames(result),
        }
    }

    fn assertion_summary(result: &HeadlessResult) -> Option<String> {
        (result.assertions_passed > 0 || result.assertions_failed > 0).then(|| {
            format!(
                "Assertions: {} passed, {} failed",
                result.assertions_passed, result.assertions_failed
            )
        })
    }

    fn format_text(result: &HeadlessResult) -> String {
        let assertions = Self::assertion_summary(result)
            .map(|s| format!(" | {s}"))
            .unwrap_or_default();

        format!(
            "{}\nEvents: {} executed in {}ms{}\n",
            result.screen,
            result.events_executed,
            result.duration.as_millis(),
            assertions
        )
    }

    fn format_json(result: &HeadlessResult) -> String {
        let json_output = JsonOutput {
            screen: &result.screen,
            screen_lines: &result.screen_lines,
            events_executed: result.events_executed,
            duration_ms: u64::try_from(result.duration.as_millis()).unwrap_or(u64::MAX),
            assertions: AssertionSummary {
                passed: result.assertions_passed,
                failed: result.assertions_failed,
            },
            state: &result.state,
            semantics: &result.semantics,
        };

        serde_json::to_string_pretty(&json_output)
            .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {e}\"}}"))
    }

    fn format_frames(result: &HeadlessResult) -> String {
        let mut out = String::new();
        for frame in &result.frames {
            let event_desc = frame.event.as_deref().unwrap_or("initial");
            out.push_str(&format!(
                "=== FRAME {} ({}) ===\n{}\n\n",
                frame.number, event_desc, frame.screen
            ));
        }

        out.push_str(&format!(
            "Total: {} frames, {} events executed in {}ms\n",
            result.frames.len(),
            result.events_executed,
            result.duration.as_millis(),
        ));
        if let Some(summary) = Self::assertion_summary(result) {
            out.push_str(&summary);
            out.push('\n');
        }
        out
    }
}
