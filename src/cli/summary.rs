//! Summary CLI command
//!
//! Builds the starter ledger, applies edits given on the command line and
//! prints the resulting balance sheet or the full snapshot as JSON.

use clap::Args;
use tracing::info;

use crate::config::Settings;
use crate::display::{format_balance_sheet, format_ledger_table};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetPeriod, CellAddress, Money, MonthKey, RowAddress};
use crate::services::LedgerStore;

/// Arguments for `budget-grid summary`
#[derive(Args, Debug, Default, Clone)]
pub struct SummaryArgs {
    /// First month of the range (YYYY-MM); defaults to the configured start
    #[arg(long)]
    pub start: Option<String>,

    /// Last month of the range (YYYY-MM); defaults to the configured end
    #[arg(long)]
    pub end: Option<String>,

    /// Opening balance (e.g., "1500" or "1500.00")
    #[arg(long, allow_hyphen_values = true)]
    pub opening: Option<String>,

    /// Set one cell: section:group:sub:YYYY-MM=AMOUNT
    #[arg(long = "set", value_name = "ADDRESS=AMOUNT")]
    pub set: Vec<String>,

    /// Set every month of a row: section:group:sub=AMOUNT
    #[arg(long = "fill", value_name = "ROW=AMOUNT")]
    pub fill: Vec<String>,

    /// Also print the ledger rows
    #[arg(long)]
    pub ledger: bool,

    /// Print the snapshot as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// Handle `budget-grid summary`
pub fn handle_summary_command(settings: &Settings, args: &SummaryArgs) -> BudgetResult<()> {
    println!("{}", run_summary(settings, args)?);
    Ok(())
}

/// Build the ledger described by `args` and render it
pub fn run_summary(settings: &Settings, args: &SummaryArgs) -> BudgetResult<String> {
    let store = build_store(settings, args)?;
    let snapshot = store.snapshot();

    if args.json {
        return Ok(serde_json::to_string_pretty(&*snapshot)?);
    }

    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();
    if args.ledger {
        output.push_str(&format_ledger_table(&snapshot, symbol));
        output.push_str("\n\n");
    }
    output.push_str(&format!("Budget: {}\n", snapshot.ledger.period));
    output.push_str(&format_balance_sheet(&snapshot.balances, symbol));
    Ok(output)
}

fn build_store(settings: &Settings, args: &SummaryArgs) -> BudgetResult<LedgerStore> {
    let period = resolve_period(settings, args)?;
    let opening = match &args.opening {
        Some(text) => parse_amount(text, true)?,
        None => settings.opening_balance,
    };

    let mut store = LedgerStore::with_defaults(period, opening);

    for edit in &args.fill {
        let (row, amount) = split_edit(edit)?;
        let row: RowAddress = row
            .parse()
            .map_err(|e| BudgetError::Validation(format!("{}", e)))?;
        if !store.apply_to_row(&row, parse_amount(amount, false)?) {
            return Err(BudgetError::Validation(format!("Unknown row '{}'", row)));
        }
    }

    for edit in &args.set {
        let (cell, amount) = split_edit(edit)?;
        let cell: CellAddress = cell
            .parse()
            .map_err(|e| BudgetError::Validation(format!("{}", e)))?;
        if !store.set_cell(&cell, parse_amount(amount, false)?) {
            return Err(BudgetError::Validation(format!(
                "Cell '{}' is not in the ledger",
                cell
            )));
        }
    }

    info!(
        revision = store.revision(),
        months = store.months().len(),
        "summary ledger built"
    );
    Ok(store)
}

fn resolve_period(settings: &Settings, args: &SummaryArgs) -> BudgetResult<BudgetPeriod> {
    let default = settings.default_period()?;
    let start = match &args.start {
        Some(text) => text.parse()?,
        None => MonthKey::from_date(default.start_month()),
    };
    let end = match &args.end {
        Some(text) => text.parse()?,
        None => MonthKey::from_date(default.end_month()),
    };
    Ok(BudgetPeriod::between(start, end)?)
}

fn split_edit(edit: &str) -> BudgetResult<(&str, &str)> {
    edit.rsplit_once('=')
        .ok_or_else(|| BudgetError::Validation(format!("Expected TARGET=AMOUNT, got '{}'", edit)))
}

fn parse_amount(text: &str, allow_negative: bool) -> BudgetResult<Money> {
    let amount = Money::parse(text.trim())
        .map_err(|e| BudgetError::Validation(format!("{}", e)))?;
    if amount.is_negative() && !allow_negative {
        return Err(BudgetError::Validation(format!(
            "Cell values cannot be negative: {}",
            text
        )));
    }
    Ok(amount)
}
