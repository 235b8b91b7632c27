//! Path management for budget-grid
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_GRID_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/budget-grid` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{BudgetError, BudgetResult};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "BUDGET_GRID_CONFIG_DIR";

/// Manages all paths used by budget-grid
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> BudgetResult<Self> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "budget-grid")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    BudgetError::Config("Could not determine a config directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Paths rooted at a custom directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the log file
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("budget-grid.log")
    }

    /// Create the config directory if it is missing
    pub fn ensure_directories(&self) -> BudgetResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            BudgetError::Io(format!("Failed to create config directory: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.log_file(), temp_dir.path().join("budget-grid.log"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        env::set_var(CONFIG_DIR_ENV, temp_dir.path());

        let paths = BudgetPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(CONFIG_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().join("nested").join("cfg"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().is_dir());
    }
}
