//! budget-grid - Terminal budgeting spreadsheet
//!
//! Income and expense subcategories are laid out as rows against a range of
//! months. Every edit recomputes per-month income, expenses and profit, and
//! carries each month's closing balance into the next month's opening
//! balance.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: `tracing` subscriber setup
//! - `models`: Amounts, months, ids, cell addresses and the ledger tree
//! - `services`: The ledger store and input guards
//! - `grid`: Cell-id grid and focus tracking for keyboard navigation
//! - `display`: Table output for the command line
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust
//! use budget_grid::models::{BudgetPeriod, GroupId, Money, MonthKey, SectionId, SubCategoryId};
//! use budget_grid::services::LedgerStore;
//!
//! let mut store = LedgerStore::with_defaults(BudgetPeriod::default(), Money::zero());
//! let jan = MonthKey::new(2024, 1).unwrap();
//! store.set_cell_value(
//!     SectionId::Income,
//!     &GroupId::new("revenue"),
//!     &SubCategoryId::new("sales"),
//!     jan,
//!     Money::from_units(1000),
//! );
//! assert_eq!(store.balances()[0].closing_balance, Money::from_units(1000));
//! assert_eq!(store.balances()[1].opening_balance, Money::from_units(1000));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod grid;
pub mod logging;
pub mod models;
pub mod services;
pub mod tui;

pub use error::{BudgetError, BudgetResult};
