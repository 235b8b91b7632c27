//! Layout definitions for the TUI
//!
//! Defines the overall layout structure: header, ledger grid, balance
//! block, status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the balance block: five rows, a header and two borders
pub const BALANCE_BLOCK_HEIGHT: u16 = 8;

/// Width of the row label column
pub const LABEL_WIDTH: u16 = 26;

/// Width of one month column
pub const MONTH_WIDTH: u16 = 12;

/// Layout regions for the TUI
pub struct AppLayout {
    /// Title line with the period and opening balance
    pub header: Rect,
    /// Ledger rows
    pub grid: Rect,
    /// Opening / income / expenses / profit / closing
    pub balances: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                    // Header
                Constraint::Min(5),                       // Grid
                Constraint::Length(BALANCE_BLOCK_HEIGHT), // Balances
                Constraint::Length(1),                    // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            grid: chunks[1],
            balances: chunks[2],
            status_bar: chunks[3],
        }
    }
}

/// Number of month columns that fit next to the label column
pub fn visible_month_columns(area: Rect) -> usize {
    // Borders take two columns; the table adds one space between columns
    let available = area.width.saturating_sub(2 + LABEL_WIDTH);
    (available / (MONTH_WIDTH + 1)).max(1) as usize
}

/// Create a centered rect for dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_fills_area() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status_bar.y, 39);
        assert_eq!(layout.balances.height, BALANCE_BLOCK_HEIGHT);
        assert_eq!(layout.grid.height, 40 - 2 - BALANCE_BLOCK_HEIGHT);
    }

    #[test]
    fn test_visible_month_columns() {
        assert_eq!(visible_month_columns(Rect::new(0, 0, 28 + 13 * 4, 10)), 4);
        assert_eq!(visible_month_columns(Rect::new(0, 0, 20, 10)), 1);
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect_fixed(50, 7, area);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.y, 1);
    }
}
