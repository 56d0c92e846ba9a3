//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::App;
use super::widgets::header::{FetchStatus, Header};
use super::widgets::input::{calculate_scroll_offset, InputBar, PROMPT_WIDTH};
use super::widgets::options::{list_height, OptionsList};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Key hints shown in the footer.
const KEY_HINTS: &str = " ↑/↓ move  ^↑/^↓ first/last  Enter select  Esc close  ^Q quit";

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let list_rows = list_height(app.widget.match_count(), app.widget.options().max_visible);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),         // Header
            Constraint::Length(3),         // Input
            Constraint::Length(list_rows), // Options
            Constraint::Min(0),            // Status
            Constraint::Length(1),         // Footer
        ])
        .split(area);

    render_header(frame, main_layout[0], app);
    render_input(frame, main_layout[1], app);
    render_options(frame, main_layout[2], app);
    render_status(frame, main_layout[3], app);
    render_footer(frame, main_layout[4]);
}

/// Renders the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let status = FetchStatus::from_flags(app.loading, app.fetch_error);
    frame.render_widget(Header::new(&app.source_label, status), area);
}

/// Renders the input bar.
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let widget = &app.widget;
    let focused = widget.is_focused();
    frame.render_widget(
        InputBar::new(widget.text(), widget.cursor(), focused, widget.is_open()),
        area,
    );

    if focused && area.height > 2 {
        let scroll = calculate_scroll_offset(widget.cursor(), InputBar::available_width(area));
        let column = (widget.cursor() - scroll) as u16;
        // Account for border (1) and prompt
        let cursor_x = area.x + 1 + PROMPT_WIDTH + column;
        let cursor_y = area.y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

/// Renders the options list and remembers where it went for mouse hits.
fn render_options(frame: &mut Frame, area: Rect, app: &mut App) {
    if area.height == 0 || !app.widget.is_open() {
        app.list_area = None;
        return;
    }
    // The layout may give fewer rows than asked for on a short terminal
    let inner_rows = usize::from(area.height.saturating_sub(2));
    app.widget.set_visible_rows(inner_rows);

    let labels = app.widget.match_labels();
    let list = OptionsList::new(&labels, app.widget.visible_range(), app.widget.active_index());
    frame.render_widget(list, area);
    app.list_area = Some(area);
}

/// Renders the last selection or fetch problem.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }

    let line = if app.loading {
        Line::from(Span::styled(
            " Loading records…",
            Style::default().fg(Color::Yellow),
        ))
    } else if app.fetch_error {
        Line::from(Span::styled(
            " Failed to load records",
            Style::default().fg(Color::Red),
        ))
    } else if let Some(label) = &app.last_commit {
        Line::from(vec![
            Span::styled(" Selected: ", Style::default().fg(Color::DarkGray)),
            Span::styled(label.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ])
    } else {
        Line::from(Span::styled(
            format!(" {} records", app.widget.records().len()),
            Style::default().fg(Color::DarkGray),
        ))
    };

    let status_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    frame.render_widget(Paragraph::new(line), status_area);
}

/// Renders the key hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, area);
}
