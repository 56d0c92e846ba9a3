//! Header widget for the TUI.
//!
//! Displays the application name, version, and the record source with its
//! fetch status.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Status of the record fetch shown on the right of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Ready,
    Failed,
}

impl FetchStatus {
    pub fn from_flags(loading: bool, error: bool) -> Self {
        if loading {
            Self::Loading
        } else if error {
            Self::Failed
        } else {
            Self::Ready
        }
    }

    fn indicator(self) -> (&'static str, Color) {
        match self {
            Self::Loading => ("…", Color::Yellow),
            Self::Ready => ("●", Color::Green),
            Self::Failed => ("✗", Color::Red),
        }
    }
}

/// Header bar widget.
pub struct Header<'a> {
    source: &'a str,
    status: FetchStatus,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    pub fn new(source: &'a str, status: FetchStatus) -> Self {
        Self { source, status }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        let left_text = format!(" Typeahead v{}", env!("CARGO_PKG_VERSION"));
        let left_span = Span::styled(left_text, style);
        buf.set_span(area.x, area.y, &left_span, area.width);

        let (dot, color) = self.status.indicator();
        let status_style = Style::default().bg(Color::Blue).fg(color);
        let source_text = format!(" [{}] ", self.source);
        let right_width = (source_text.chars().count() + 2) as u16;
        if right_width < area.width {
            let right_x = area.right().saturating_sub(right_width);
            buf.set_string(right_x, area.y, " ", style);
            buf.set_string(right_x + 1, area.y, dot, status_style);
            buf.set_string(right_x + 2, area.y, &source_text, style);
        }
    }
}
