//! Core data models for budget-grid
//!
//! The ledger tree (sections, groups, subcategories), the month and period
//! types it is keyed by, the fixed-point amount type, and cell addresses.

pub mod cell;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod month;

pub use cell::{CellAddress, CellAddressError, RowAddress};
pub use ids::{GroupId, SectionId, SubCategoryId};
pub use ledger::{
    BudgetSection, CategoryGroup, GroupValues, Ledger, MonthValues, MonthlyBalance, SubCategory,
};
pub use money::Money;
pub use month::{BudgetPeriod, MonthKey, PeriodError};
