//! Ledger grid view
//!
//! Subcategory rows by month columns, with group subtotals and section
//! totals. Only the month window around the focused column is drawn.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::models::{BudgetSection, CategoryGroup, Money, MonthKey, RowAddress};
use crate::tui::app::{App, InputMode};
use crate::tui::layout::{visible_month_columns, LABEL_WIDTH, MONTH_WIDTH};

/// Month columns currently on screen
pub fn visible_months(app: &App, area: Rect) -> Vec<MonthKey> {
    app.store
        .months()
        .iter()
        .skip(app.column_offset)
        .take(visible_month_columns(area))
        .copied()
        .collect()
}

/// Column constraints shared by the grid and the balance block
pub fn column_widths(months: usize) -> Vec<Constraint> {
    let mut widths = vec![Constraint::Length(LABEL_WIDTH)];
    widths.extend(std::iter::repeat(Constraint::Length(MONTH_WIDTH)).take(months));
    widths
}

/// Header row with month labels
pub fn month_header(months: &[MonthKey]) -> Row<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut cells = vec![Cell::from("")];
    cells.extend(
        months
            .iter()
            .map(|m| Cell::from(Line::from(m.short_label()).right_aligned()).style(bold)),
    );
    Row::new(cells).style(Style::default().fg(Color::Yellow))
}

/// Right-aligned amount cell
pub fn amount_cell(value: Money, symbol: &str, style: Style) -> Cell<'static> {
    Cell::from(Line::from(value.format_with_symbol(symbol)).right_aligned()).style(style)
}

struct GridRows<'a> {
    app: &'a App,
    months: &'a [MonthKey],
    symbol: &'a str,
    focused: Option<RowAddress>,
    rows: Vec<Row<'static>>,
    selected: Option<usize>,
}

impl<'a> GridRows<'a> {
    fn push_label(&mut self, label: String, style: Style) {
        let mut cells = vec![Cell::from(label)];
        cells.extend(self.months.iter().map(|_| Cell::from("")));
        self.rows.push(Row::new(cells).style(style));
    }

    fn push_totals(&mut self, label: String, total: impl Fn(MonthKey) -> Money, style: Style) {
        let mut cells = vec![Cell::from(label)];
        cells.extend(
            self.months
                .iter()
                .map(|m| amount_cell(total(*m), self.symbol, Style::default())),
        );
        self.rows.push(Row::new(cells).style(style));
    }

    /// An editable row; the focused cell is highlighted or shows the editor
    fn push_editable(
        &mut self,
        row: RowAddress,
        label: String,
        value: impl Fn(MonthKey) -> Money,
        style: Style,
    ) {
        let is_focused_row = self.focused.as_ref() == Some(&row);
        let focused_month = self.app.focused_cell().map(|c| c.month);
        let editing = self.app.input_mode == InputMode::Editing;

        let mut cells = vec![Cell::from(label)];
        for month in self.months {
            let focused = is_focused_row && focused_month == Some(*month);
            let cell = if focused && editing {
                Cell::from(Line::from(
                    self.app.cell_input.spans(Style::default().fg(Color::White)),
                ))
            } else if focused {
                amount_cell(
                    value(*month),
                    self.symbol,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                amount_cell(value(*month), self.symbol, Style::default())
            };
            cells.push(cell);
        }

        if is_focused_row {
            self.selected = Some(self.rows.len());
        }
        self.rows.push(Row::new(cells).style(style));
    }

    fn push_group(&mut self, section: &BudgetSection, group: &CategoryGroup) {
        if group.is_direct() {
            let row = RowAddress::new(section.id, group.id.clone(), None);
            self.push_editable(
                row,
                group.name.clone(),
                |m| group.total(Some(m)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            );
            return;
        }

        self.push_label(
            format!("▼ {}", group.name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        );
        for sub_category in &group.sub_categories {
            let row = RowAddress::new(
                section.id,
                group.id.clone(),
                Some(sub_category.id.clone()),
            );
            let style = if sub_category.is_new {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            self.push_editable(
                row,
                format!("  {}", sub_category.name),
                |m| sub_category.value(m),
                style,
            );
        }
        self.push_totals(
            format!("  {} total", group.name),
            |m| group.total(Some(m)),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        );
    }

    fn push_section(&mut self, section: &BudgetSection) {
        self.push_label(
            section.id.title().to_uppercase(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        );
        for group in &section.category_groups {
            self.push_group(section, group);
        }
        self.push_totals(
            format!("Total {}", section.id.title()),
            |m| section.total(Some(m)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        );
    }
}

/// Render the ledger grid
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    app.ensure_column_visible(visible_month_columns(area));
    let months = visible_months(app, area);
    let total_months = app.store.months().len();

    let snapshot = app.store.snapshot();
    let symbol = app.settings.currency_symbol.clone();
    let app: &App = app;

    let mut grid = GridRows {
        app,
        months: &months,
        symbol: &symbol,
        focused: app.focused_row(),
        rows: Vec::new(),
        selected: None,
    };
    for section in snapshot.ledger.sections() {
        grid.push_section(section);
    }
    let GridRows { rows, selected, .. } = grid;

    let scroll_hint = match (
        app.column_offset > 0,
        app.column_offset + months.len() < total_months,
    ) {
        (true, true) => " ◀ ▶ ",
        (true, false) => " ◀ ",
        (false, true) => " ▶ ",
        (false, false) => "",
    };
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(
                format!(" Budget {} ", snapshot.ledger.period),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(scroll_hint, Style::default().fg(Color::DarkGray)),
        ]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let table = Table::new(rows, column_widths(months.len()))
        .header(month_header(&months))
        .block(block);

    let mut state = TableState::default();
    state.select(selected);
    frame.render_stateful_widget(table, area, &mut state);
}
