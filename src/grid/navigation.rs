//! Navigation grid over editable cells
//!
//! The grid is a snapshot of cell ids split into rows. Rows can be ragged;
//! left/right clamp to the current row's own length.

use std::fmt;

use crate::models::cell::row_key_of;

/// Row/column coordinate inside a [`Grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Arrow-key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Ordered rows of cell ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

/// Split an ordered list of cell ids into rows; a new row starts whenever
/// the row key (id minus its trailing month segment) changes.
pub fn build_grid<I, S>(cell_ids: I) -> Grid
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut last_key: Option<String> = None;

    for id in cell_ids {
        let id: String = id.into();
        let key = row_key_of(&id).to_string();
        match rows.last_mut() {
            Some(row) if last_key.as_deref() == Some(key.as_str()) => row.push(id),
            _ => rows.push(vec![id]),
        }
        last_key = Some(key);
    }

    Grid { rows }
}

impl Grid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in `row` (zero when out of range)
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cell id at a coordinate
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Coordinate of a cell id
    pub fn locate(&self, cell_id: &str) -> Option<GridPos> {
        self.rows.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|id| id == cell_id)
                .map(|col| GridPos::new(row, col))
        })
    }

    /// Clamped move one step in `direction`; `None` when already at that edge
    /// or when the source is off the grid.
    pub fn move_from(&self, row: usize, col: usize, direction: Direction) -> Option<GridPos> {
        self.cell_at(row, col)?;

        let (target_row, target_col) = match direction {
            Direction::Up => (row.saturating_sub(1), col),
            Direction::Down => ((row + 1).min(self.rows.len() - 1), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(self.row_len(row) - 1)),
        };

        if (target_row, target_col) == (row, col) {
            return None;
        }

        // A shorter neighbouring row pulls the column back inside it
        let target_col = target_col.min(self.row_len(target_row).saturating_sub(1));
        Some(GridPos::new(target_row, target_col))
    }

    /// Tab-order step: along the row, then wrapping to the next row's first
    /// cell (forward) or the previous row's last cell (backward).
    pub fn advance_tab_order(&self, row: usize, col: usize, forward: bool) -> Option<GridPos> {
        let direction = if forward {
            Direction::Right
        } else {
            Direction::Left
        };
        if let Some(pos) = self.move_from(row, col, direction) {
            return Some(pos);
        }
        self.cell_at(row, col)?;

        if forward {
            (row + 1..self.rows.len())
                .find(|r| self.row_len(*r) > 0)
                .map(|r| GridPos::new(r, 0))
        } else {
            (0..row)
                .rev()
                .find(|r| self.row_len(*r) > 0)
                .map(|r| GridPos::new(r, self.row_len(r) - 1))
        }
    }

    /// First cell of the grid
    pub fn first(&self) -> Option<GridPos> {
        self.rows
            .iter()
            .position(|r| !r.is_empty())
            .map(|row| GridPos::new(row, 0))
    }

    /// Nearest valid coordinate to `pos`
    pub fn clamp(&self, pos: GridPos) -> Option<GridPos> {
        if self.is_empty() {
            return None;
        }
        let row = pos.row.min(self.rows.len() - 1);
        let row = (0..=row)
            .rev()
            .find(|r| self.row_len(*r) > 0)
            .or_else(|| self.first().map(|p| p.row))?;
        Some(GridPos::new(row, pos.col.min(self.row_len(row) - 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellAddress, GroupId, MonthKey, SectionId, SubCategoryId};

    /// 3 rows x 2 columns
    fn small_grid() -> Grid {
        build_grid([
            "income:g:a:January 2024",
            "income:g:a:February 2024",
            "income:g:b:January 2024",
            "income:g:b:February 2024",
            "expenses:h:c:January 2024",
            "expenses:h:c:February 2024",
        ])
    }

    #[test]
    fn test_build_grid_splits_rows_on_key_change() {
        let grid = small_grid();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.row_len(0), 2);
        assert_eq!(grid.cell_at(1, 1), Some("income:g:b:February 2024"));
        assert_eq!(grid.cell_at(3, 0), None);
        assert_eq!(grid.cell_at(0, 2), None);
    }

    #[test]
    fn test_locate() {
        let grid = small_grid();
        assert_eq!(
            grid.locate("expenses:h:c:February 2024"),
            Some(GridPos::new(2, 1))
        );
        assert_eq!(grid.locate("income:g:z:January 2024"), None);
    }

    #[test]
    fn test_move_clamps_at_edges() {
        let grid = small_grid();
        assert_eq!(grid.move_from(0, 0, Direction::Up), None);
        assert_eq!(grid.move_from(0, 1, Direction::Right), None);
        assert_eq!(grid.move_from(1, 0, Direction::Down), Some(GridPos::new(2, 0)));
        assert_eq!(grid.move_from(2, 0, Direction::Down), None);
        assert_eq!(grid.move_from(1, 1, Direction::Left), Some(GridPos::new(1, 0)));
        assert_eq!(grid.move_from(2, 1, Direction::Up), Some(GridPos::new(1, 1)));
    }

    #[test]
    fn test_move_from_off_grid() {
        assert_eq!(small_grid().move_from(9, 0, Direction::Up), None);
        assert_eq!(Grid::default().move_from(0, 0, Direction::Down), None);
    }

    #[test]
    fn test_move_into_shorter_row() {
        let grid = build_grid(["a:x:1:January 2024", "a:x:1:February 2024", "a:x:2:January 2024"]);
        assert_eq!(grid.move_from(0, 1, Direction::Down), Some(GridPos::new(1, 0)));
    }

    #[test]
    fn test_tab_wraps_between_rows() {
        let grid = small_grid();
        assert_eq!(grid.advance_tab_order(0, 1, true), Some(GridPos::new(1, 0)));
        assert_eq!(grid.advance_tab_order(0, 0, true), Some(GridPos::new(0, 1)));
        assert_eq!(grid.advance_tab_order(1, 0, false), Some(GridPos::new(0, 1)));
    }

    #[test]
    fn test_tab_stops_at_grid_ends() {
        let grid = small_grid();
        assert_eq!(grid.advance_tab_order(0, 0, false), None);
        assert_eq!(grid.advance_tab_order(2, 1, true), None);
    }

    #[test]
    fn test_rows_split_on_cell_address_row_key() {
        let month = |m| MonthKey::new(2024, m).unwrap();
        let cells: Vec<CellAddress> = ["a", "b"]
            .iter()
            .flat_map(|sub| {
                (1..=3).map(move |m| {
                    CellAddress::new(
                        SectionId::Income,
                        GroupId::new("g"),
                        Some(SubCategoryId::new(*sub)),
                        month(m),
                    )
                })
            })
            .collect();

        let grid = build_grid(cells.iter().map(|c| c.to_string()));
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.row_len(1), 3);
        assert_eq!(grid.cell_at(1, 2), Some(cells[5].to_string().as_str()));
    }

    #[test]
    fn test_clamp() {
        let grid = small_grid();
        assert_eq!(grid.clamp(GridPos::new(7, 5)), Some(GridPos::new(2, 1)));
        assert_eq!(grid.clamp(GridPos::new(1, 0)), Some(GridPos::new(1, 0)));
        assert_eq!(Grid::default().clamp(GridPos::new(0, 0)), None);
        assert_eq!(Grid::default().first(), None);
    }
}
