//! Event handler for the TUI
//!
//! Routes keyboard and paste events to the appropriate handlers
//! based on the current application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::grid::Direction;

use super::app::{ActiveDialog, App, InputMode};
use super::dialogs;
use super::dialogs::prompt::PromptKind;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => {
            app.acknowledge_new_rows();
            handle_key_event(app, key);
        }
        Event::Paste(text) => handle_paste(app, &text),
        Event::Tick | Event::Resize(_, _) => {}
    }
    Ok(())
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Check if we're in a dialog first
    if app.has_dialog() {
        handle_dialog_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.quit();
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => move_focus(app, Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => move_focus(app, Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => move_focus(app, Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => move_focus(app, Direction::Right),
        KeyCode::Tab => {
            app.focus.tab(true);
        }
        KeyCode::BackTab => {
            app.focus.tab(false);
        }

        // Ledger
        KeyCode::Enter => app.begin_edit(),
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            app.begin_edit_with(&c.to_string());
        }
        KeyCode::Char('a') => app.open_add_row_prompt(),
        KeyCode::Char('g') => {
            let section = app.focused_section();
            app.open_prompt(PromptKind::AddGroup { section });
        }
        KeyCode::Char('G') => {
            let section = app.focused_section();
            app.open_prompt(PromptKind::AddDirectGroup { section });
        }
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete_row(),
        KeyCode::Char('m') => {
            if app.focused_cell().is_some() {
                app.open_dialog(ActiveDialog::CellMenu);
            }
        }
        KeyCode::Char('r') => app.open_dialog(ActiveDialog::Period),
        KeyCode::Char('o') => app.open_prompt(PromptKind::OpeningBalance),
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}

fn move_focus(app: &mut App, direction: Direction) {
    app.focus.navigate(direction);
}

/// Handle keys while typing into a cell
fn handle_editing_key(app: &mut App, key: KeyEvent) {
    let input = &mut app.cell_input;
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Tab => {
            app.commit_edit();
            app.focus.tab(true);
        }
        KeyCode::BackTab => {
            app.commit_edit();
            app.focus.tab(false);
        }
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        KeyCode::Char(c) => {
            if !input.insert(c) {
                app.set_status(format!("'{}' is not allowed in a value", c));
            }
        }
        _ => {}
    }
}

/// Route keys to the open dialog
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::Help => {
            // Close help on any key
            app.close_dialog();
        }
        ActiveDialog::Confirm(_) => {
            dialogs::confirm::handle_key(app, key);
        }
        ActiveDialog::Prompt => {
            dialogs::prompt::handle_key(app, key);
        }
        ActiveDialog::Period => {
            dialogs::period::handle_key(app, key);
        }
        ActiveDialog::CellMenu => {
            dialogs::cell_menu::handle_key(app, key);
        }
        ActiveDialog::None => {}
    }
}

/// Pasted text goes to whichever input is active
fn handle_paste(app: &mut App, text: &str) {
    match app.active_dialog {
        ActiveDialog::Prompt => app.prompt.input.insert_str(text),
        ActiveDialog::None => match app.input_mode {
            InputMode::Editing => app.cell_input.insert_str(text),
            InputMode::Normal => app.begin_edit_with(text),
        },
        _ => {}
    }
}
