//! Options list widget for the TUI.
//!
//! Renders the window of matches the widget's viewport exposes, with the
//! active option highlighted.

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Height of the list for `match_count` matches and `max_visible` rows,
/// border included. Zero while there is nothing to show.
pub fn list_height(match_count: usize, max_visible: usize) -> u16 {
    if match_count == 0 {
        return 0;
    }
    let rows = match_count.min(max_visible);
    u16::try_from(rows + 2).unwrap_or(u16::MAX)
}

/// The options popup.
pub struct OptionsList<'a> {
    labels: &'a [String],
    visible: Range<usize>,
    /// 1-based.
    active: Option<usize>,
}

impl<'a> OptionsList<'a> {
    pub fn new(labels: &'a [String], visible: Range<usize>, active: Option<usize>) -> Self {
        Self {
            labels,
            visible,
            active,
        }
    }

    fn title(&self) -> String {
        match self.active {
            Some(pos) => format!(" Options ({}/{}) ", pos, self.labels.len()),
            None => " Options ".to_string(),
        }
    }
}

impl Widget for OptionsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(self.title());

        let inner = block.inner(area);
        block.render(area, buf);

        let rows = self
            .labels
            .iter()
            .enumerate()
            .skip(self.visible.start)
            .take(self.visible.len())
            .take(inner.height as usize);

        for (row, (idx, label)) in rows.enumerate() {
            let y = inner.y + row as u16;
            let is_active = self.active == Some(idx + 1);

            let (marker, style) = if is_active {
                (
                    "▸ ",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default())
            };

            if is_active {
                for x in inner.x..inner.x + inner.width {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_bg(Color::Cyan);
                    }
                }
            }

            let line = Line::from(vec![
                Span::styled(marker, style),
                Span::styled(label.as_str(), style),
            ]);
            Paragraph::new(line).render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}
