//! Terminal User Interface module
//!
//! An interactive spreadsheet over the ledger using ratatui: a grid of
//! subcategory rows by month columns, a balance block, and modal dialogs
//! for adding rows, changing the date range and the opening balance.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

// Keybindings (help screen)
pub mod keybindings;

pub use app::App;
pub use terminal::run_tui;
