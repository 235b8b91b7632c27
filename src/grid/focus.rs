//! Focus tracking across re-renders
//!
//! The host UI calls [`FocusTracker::on_render_complete`] once it has laid
//! out the current cells. That rebuilds the grid snapshot, keeps the focused
//! cell pinned by id, and resolves any focus request made before the cells
//! existed (the first cell at startup, a freshly added row).

use super::navigation::{build_grid, Direction, Grid, GridPos};

/// Focus to apply at the next render-complete notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusRequest {
    /// The first cell of the grid
    First,
    /// A specific cell id
    Cell(String),
}

/// Tracks the focused cell of the current grid
#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    grid: Grid,
    focused: Option<GridPos>,
    focused_id: Option<String>,
    pending: Option<FocusRequest>,
}

impl FocusTracker {
    /// A tracker that focuses the first cell once cells are rendered
    pub fn new() -> Self {
        Self {
            pending: Some(FocusRequest::First),
            ..Self::default()
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn focused(&self) -> Option<GridPos> {
        self.focused
    }

    /// Id of the focused cell
    pub fn focused_id(&self) -> Option<&str> {
        self.focused_id.as_deref()
    }

    /// Queue a focus change for the next render-complete notification
    pub fn request_focus(&mut self, request: FocusRequest) {
        self.pending = Some(request);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Rebuild the grid from the rendered cell ids and settle focus
    pub fn on_render_complete<I, S>(&mut self, cell_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grid = build_grid(cell_ids);

        if let Some(request) = self.pending.take() {
            let target = match &request {
                FocusRequest::First => self.grid.first(),
                FocusRequest::Cell(id) => self.grid.locate(id),
            };
            if target.is_some() {
                self.set_focus(target);
                return;
            }
            if self.grid.is_empty() {
                // Nothing rendered yet; try again next pass
                self.pending = Some(request);
            }
        }

        let relocated = self
            .focused_id
            .as_deref()
            .and_then(|id| self.grid.locate(id))
            .or_else(|| self.focused.and_then(|pos| self.grid.clamp(pos)));
        self.set_focus(relocated);
    }

    /// Focus a coordinate directly (e.g. from a mouse click)
    pub fn focus_at(&mut self, row: usize, col: usize) -> bool {
        if self.grid.cell_at(row, col).is_none() {
            return false;
        }
        self.set_focus(Some(GridPos::new(row, col)));
        true
    }

    /// Focus a cell by id in the current grid
    pub fn focus_id(&mut self, cell_id: &str) -> bool {
        match self.grid.locate(cell_id) {
            Some(pos) => {
                self.set_focus(Some(pos));
                true
            }
            None => false,
        }
    }

    /// Arrow navigation; with nothing focused this focuses the first cell
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let target = match self.focused {
            None => self.grid.first(),
            Some(pos) => self.grid.move_from(pos.row, pos.col, direction),
        };
        self.apply(target)
    }

    /// Tab / Shift-Tab navigation
    pub fn tab(&mut self, forward: bool) -> bool {
        let target = match self.focused {
            None => self.grid.first(),
            Some(pos) => self.grid.advance_tab_order(pos.row, pos.col, forward),
        };
        self.apply(target)
    }

    fn apply(&mut self, target: Option<GridPos>) -> bool {
        match target {
            Some(pos) => {
                self.set_focus(Some(pos));
                true
            }
            None => false,
        }
    }

    fn set_focus(&mut self, pos: Option<GridPos>) {
        self.focused = pos;
        self.focused_id = pos
            .and_then(|p| self.grid.cell_at(p.row, p.col))
            .map(str::to_string);
    }
}
