//! TUI Views module
//!
//! The ledger grid, the balance block underneath it and the status bar.

pub mod balances;
pub mod grid;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);
    grid::render(frame, app, layout.grid);
    balances::render(frame, app, layout.balances);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let ledger = app.store.ledger();
    let symbol = app.settings.currency_symbol.as_str();
    let closing = app
        .store
        .balances()
        .last()
        .map(|b| b.closing_balance)
        .unwrap_or(ledger.opening_balance);

    let line = Line::from(vec![
        Span::styled(
            " budget-grid ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Opening "),
        Span::styled(
            ledger.opening_balance.format_with_symbol(symbol),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  →  Closing "),
        Span::styled(
            closing.format_with_symbol(symbol),
            Style::default()
                .fg(if closing.is_negative() {
                    Color::Red
                } else {
                    Color::Green
                })
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match app.active_dialog.clone() {
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::Confirm(action) => {
            let message = dialogs::confirm::message(app, &action);
            dialogs::confirm::render(frame, &message);
        }
        ActiveDialog::Prompt => dialogs::prompt::render(frame, app),
        ActiveDialog::Period => dialogs::period::render(frame, app),
        ActiveDialog::CellMenu => dialogs::cell_menu::render(frame, app),
        ActiveDialog::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::LedgerStore;
    use crate::tui::dialogs::prompt::PromptKind;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        app.after_render();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            text.push_str(cell.symbol());
            if (i + 1) % width == 0 {
                text.push('\n');
            }
        }
        text
    }

    #[test]
    fn test_render_grid_and_balances() {
        let mut app = App::new(LedgerStore::default(), Settings::default());
        let screen = draw(&mut app);

        assert!(screen.contains("INCOME"));
        assert!(screen.contains("General Income"));
        assert!(screen.contains("Total Expenses"));
        assert!(screen.contains("Closing balance"));
        assert!(screen.contains("Jan 24"));
        assert!(app.focus.focused().is_some());
    }

    #[test]
    fn test_render_dialogs() {
        let mut app = App::new(LedgerStore::default(), Settings::default());
        draw(&mut app);

        app.open_dialog(ActiveDialog::Help);
        assert!(draw(&mut app).contains("Global Keys"));

        app.open_prompt(PromptKind::OpeningBalance);
        assert!(draw(&mut app).contains("Opening Balance"));

        app.open_dialog(ActiveDialog::Period);
        assert!(draw(&mut app).contains("Date Range"));

        app.open_dialog(ActiveDialog::CellMenu);
        assert!(draw(&mut app).contains("Delete row"));

        app.request_delete_row();
        assert!(draw(&mut app).contains("Confirm"));
    }
}
