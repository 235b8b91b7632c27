//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;

use crate::config::Settings;
use crate::services::LedgerStore;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic info
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application
pub fn run_tui(settings: &Settings) -> Result<()> {
    let period = settings.default_period()?;
    let store = LedgerStore::with_defaults(period, settings.opening_balance);
    let mut app = App::new(store, settings.clone());

    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, &mut app, settings.tick_rate_ms);
    restore_terminal()?;

    tracing::info!(revision = app.store.revision(), "tui closed");
    result
}

fn event_loop(terminal: &mut Tui, app: &mut App, tick_rate_ms: u64) -> Result<()> {
    let events = EventHandler::new(Duration::from_millis(tick_rate_ms.max(16)));

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, app))?;
        // Cells now exist on screen; settle pending focus requests
        app.after_render();

        let event = events
            .next()
            .context("terminal event thread stopped")?;
        handle_event(app, event)?;
    }

    Ok(())
}
