//! Input widget for the TUI.
//!
//! The combobox text field: current text, a placeholder when empty, and a
//! marker showing whether the options list is expanded.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shown in the empty field.
pub const PLACEHOLDER: &str = "search";

/// Width of the "> " prompt.
pub const PROMPT_WIDTH: u16 = 2;

/// Calculates the scroll offset needed to keep the cursor visible.
///
/// Returns the number of characters to skip from the start of the text.
pub fn calculate_scroll_offset(cursor: usize, available_width: usize) -> usize {
    cursor.saturating_sub(available_width)
}

/// Input bar widget.
pub struct InputBar<'a> {
    text: &'a str,
    cursor: usize,
    focused: bool,
    expanded: bool,
}

impl<'a> InputBar<'a> {
    /// Creates a new input bar widget.
    pub fn new(text: &'a str, cursor: usize, focused: bool, expanded: bool) -> Self {
        Self {
            text,
            cursor,
            focused,
            expanded,
        }
    }

    /// Text area width once borders, prompt, marker and cursor are reserved.
    pub fn available_width(area: Rect) -> usize {
        area.width.saturating_sub(PROMPT_WIDTH + 5) as usize
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search ");

        let prompt_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        let body = if self.text.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            let scroll_offset = calculate_scroll_offset(self.cursor, Self::available_width(area));
            let visible: String = self.text.chars().skip(scroll_offset).collect();
            Span::raw(visible)
        };

        let line = Line::from(vec![Span::styled("> ", prompt_style), body]);
        Paragraph::new(line).block(block).render(area, buf);

        // Expanded marker on the right edge
        if area.width > 8 && area.height > 2 {
            let (marker, color) = if self.expanded {
                ("▼", Color::Cyan)
            } else {
                ("▶", Color::DarkGray)
            };
            buf.set_string(
                area.right() - 3,
                area.y + 1,
                marker,
                Style::default().fg(color),
            );
        }
    }
}
