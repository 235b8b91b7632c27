//! Service layer for budget-grid
//!
//! The ledger store owns the budget data and keeps the derived balances in
//! step with it; the input module guards what the UI passes in.

pub mod input;
pub mod ledger;

pub use input::{parse_cell_value, sanitize_numeric_input, validate_name};
pub use ledger::{LedgerSnapshot, LedgerStore, SubscriptionId};
