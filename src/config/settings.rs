//! User settings for budget-grid
//!
//! Holds the defaults a fresh ledger starts from (date range, opening
//! balance), display preferences and the log filter.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetPeriod, Money, MonthKey};

/// User settings for budget-grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// First month of a new ledger ("YYYY-MM")
    #[serde(default = "default_start")]
    pub default_start: String,

    /// Last month of a new ledger ("YYYY-MM")
    #[serde(default = "default_end")]
    pub default_end: String,

    /// Opening balance of a new ledger, in cents
    #[serde(default)]
    pub opening_balance: Money,

    /// TUI tick interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_start() -> String {
    "2024-01".to_string()
}

fn default_end() -> String {
    "2024-12".to_string()
}

fn default_tick_rate() -> u64 {
    250
}

fn default_log_filter() -> String {
    "budget_grid=info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_start: default_start(),
            default_end: default_end(),
            opening_balance: Money::zero(),
            tick_rate_ms: default_tick_rate(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> BudgetResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> BudgetResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))
    }

    /// The configured default date range
    pub fn default_period(&self) -> BudgetResult<BudgetPeriod> {
        let start: MonthKey = self.default_start.parse()?;
        let end: MonthKey = self.default_end.parse()?;
        Ok(BudgetPeriod::between(start, end)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.opening_balance, Money::zero());
        assert_eq!(settings.default_period().unwrap(), BudgetPeriod::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "€".into(),
            default_start: "2025-03".into(),
            default_end: "2025-08".into(),
            opening_balance: Money::from_units(500),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.default_period().unwrap().months().len(), 6);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{ "currency_symbol": "£" }"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.tick_rate_ms, 250);
    }

    #[test]
    fn test_invalid_default_range() {
        let settings = Settings {
            default_start: "2024-06".into(),
            default_end: "2024-01".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.default_period(),
            Err(BudgetError::Period(_))
        ));

        let settings = Settings {
            default_start: "soon".into(),
            ..Settings::default()
        };
        assert!(settings.default_period().is_err());
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(BudgetError::Config(_))
        ));
    }
}
