//! Status bar view
//!
//! Shows the input mode, the focused cell, the last status message and key
//! hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, InputMode};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![];

    let (mode, mode_color) = match app.input_mode {
        InputMode::Normal => (" NORMAL ", Color::Cyan),
        InputMode::Editing => (" EDIT ", Color::Green),
    };
    spans.push(Span::styled(
        mode,
        Style::default()
            .fg(Color::Black)
            .bg(mode_color)
            .add_modifier(Modifier::BOLD),
    ));

    if let Some(cell) = app.focused_cell() {
        let name = app.row_name(&cell.row).unwrap_or_default();
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{} · {}", name, cell.month),
            Style::default().fg(Color::White),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    // Key hints (right-aligned)
    let hints = match app.input_mode {
        InputMode::Normal => " Enter:Edit  m:Menu  r:Range  ?:Help  q:Quit ",
        InputMode::Editing => " Enter:Save  Tab:Next  Esc:Cancel ",
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
