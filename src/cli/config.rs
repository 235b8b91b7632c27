//! `budget-grid config`: show where things live and what the defaults are

use crate::config::{BudgetPaths, Settings};
use crate::error::BudgetResult;

/// Format the paths and settings report
pub fn format_config(paths: &BudgetPaths, settings: &Settings) -> BudgetResult<String> {
    let period = settings.default_period()?;
    let mut output = String::new();

    output.push_str("budget-grid Configuration\n");
    output.push_str("=========================\n");
    output.push_str(&format!("Config directory: {}\n", paths.base_dir().display()));
    output.push_str(&format!("Settings file:    {}\n", paths.settings_file().display()));
    output.push_str(&format!("Log file:         {}\n", paths.log_file().display()));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  Default range:   {}\n", period));
    output.push_str(&format!(
        "  Opening balance: {}\n",
        settings.opening_balance.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("  Tick rate:       {} ms\n", settings.tick_rate_ms));
    output.push_str(&format!("  Log filter:      {}\n", settings.log_filter));
    Ok(output)
}

/// Handle `budget-grid config`
pub fn handle_config_command(paths: &BudgetPaths, settings: &Settings) -> BudgetResult<()> {
    print!("{}", format_config(paths, settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_config() {
        let paths = BudgetPaths::with_base_dir(PathBuf::from("/tmp/budget-grid-test"));
        let output = format_config(&paths, &Settings::default()).unwrap();

        assert!(output.contains("config.json"));
        assert!(output.contains("January 2024 - December 2024"));
        assert!(output.contains("$0.00"));
    }
}
