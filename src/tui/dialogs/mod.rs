//! Dialog modules for the TUI
//!
//! Contains modal dialogs for various operations

pub mod cell_menu;
pub mod confirm;
pub mod help;
pub mod period;
pub mod prompt;
