//! Balance sheet formatting
//!
//! Renders the monthly rollup (opening, income, expenses, profit, closing)
//! as a terminal table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::MonthlyBalance;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Opening")]
    opening: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Closing")]
    closing: String,
}

impl BalanceRow {
    fn new(balance: &MonthlyBalance, symbol: &str) -> Self {
        Self {
            month: balance.month.to_string(),
            opening: balance.opening_balance.format_with_symbol(symbol),
            income: balance.income.format_with_symbol(symbol),
            expenses: balance.expenses.format_with_symbol(symbol),
            profit: balance.profit.format_with_symbol(symbol),
            closing: balance.closing_balance.format_with_symbol(symbol),
        }
    }
}

/// Format the per-month balances as a table
pub fn format_balance_sheet(balances: &[MonthlyBalance], symbol: &str) -> String {
    if balances.is_empty() {
        return "No months in range.".to_string();
    }

    let rows = balances.iter().map(|b| BalanceRow::new(b, symbol));
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ledger, Money};
    use crate::models::ledger::compute_balances;

    #[test]
    fn test_balance_sheet_lists_every_month() {
        let ledger = Ledger::default();
        let months = ledger.period.months();
        let output = format_balance_sheet(&compute_balances(&ledger, &months), "$");

        assert!(output.contains("Month"));
        assert!(output.contains("Closing"));
        assert!(output.contains("January 2024"));
        assert!(output.contains("December 2024"));
    }

    #[test]
    fn test_balance_sheet_amounts() {
        let mut ledger = Ledger::default();
        ledger.opening_balance = Money::from_units(250);
        let months = ledger.period.months();
        let output = format_balance_sheet(&compute_balances(&ledger, &months[..1]), "$");

        assert!(output.contains("$250.00"));
    }

    #[test]
    fn test_empty_balances() {
        assert_eq!(format_balance_sheet(&[], "$"), "No months in range.");
    }
}
