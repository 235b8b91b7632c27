//! Cell action menu
//!
//! Row-level actions for the focused cell.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Entries of the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAction {
    ApplyToAllMonths,
    DeleteRow,
}

impl CellAction {
    pub const ALL: [CellAction; 2] = [CellAction::ApplyToAllMonths, CellAction::DeleteRow];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ApplyToAllMonths => "Apply value to all months",
            Self::DeleteRow => "Delete row",
        }
    }
}

/// State for the cell menu
#[derive(Debug, Clone, Default)]
pub struct CellMenuState {
    pub selected: usize,
}

impl CellMenuState {
    pub fn selected_action(&self) -> CellAction {
        CellAction::ALL[self.selected.min(CellAction::ALL.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1).min(CellAction::ALL.len() - 1);
    }
}

/// Render the cell menu
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(34, 6, frame.area());
    frame.render_widget(Clear, area);

    let title = app
        .focused_cell()
        .map(|cell| format!(" {} ", cell.month))
        .unwrap_or_else(|| " Cell ".to_string());

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = CellAction::ALL
        .iter()
        .map(|action| ListItem::new(Line::from(Span::raw(action.label()))))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.cell_menu.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Handle key input for the cell menu
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') => app.close_dialog(),
        KeyCode::Up | KeyCode::Char('k') => app.cell_menu.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cell_menu.move_down(),
        KeyCode::Enter => {
            let action = app.cell_menu.selected_action();
            app.close_dialog();
            match action {
                CellAction::ApplyToAllMonths => app.apply_focused_to_all_months(),
                CellAction::DeleteRow => app.request_delete_row(),
            }
        }
        _ => return false,
    }
    true
}
