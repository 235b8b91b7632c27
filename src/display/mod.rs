//! Display formatting for terminal output
//!
//! Table renderings of the ledger and its balances for the non-interactive
//! commands.

pub mod balances;
pub mod ledger;

pub use balances::format_balance_sheet;
pub use ledger::format_ledger_table;
