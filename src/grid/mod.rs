//! Grid addressing
//!
//! Maps the ledger's rows (subcategories) and columns (months) onto a
//! navigable grid of cell ids, independent of how the cells are drawn.

pub mod focus;
pub mod navigation;

pub use focus::{FocusRequest, FocusTracker};
pub use navigation::{build_grid, Direction, Grid, GridPos};
