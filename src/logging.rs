//! Diagnostic logging
//!
//! Events go to `budget-grid.log` in the config directory so the terminal UI
//! owns the screen. `RUST_LOG` overrides the filter from the settings.

use std::fs::OpenOptions;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::EnvFilter;

use crate::config::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing(paths: &BudgetPaths, default_filter: &str) -> BudgetResult<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    paths.ensure_directories()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .map_err(|e| BudgetError::Io(format!("Failed to open log file: {}", e)))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    // Another subscriber (e.g. a test harness) may already own the global slot
    let _ = INSTALLED.set(());
    if installed {
        tracing::debug!(log_file = %paths.log_file().display(), "logging initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        init_tracing(&paths, "budget_grid=debug").unwrap();
        init_tracing(&paths, "budget_grid=debug").unwrap();
        assert!(paths.log_file().exists());
    }
}
