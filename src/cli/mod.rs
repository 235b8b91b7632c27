//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod summary;

pub use config::handle_config_command;
pub use summary::{handle_summary_command, run_summary, SummaryArgs};
