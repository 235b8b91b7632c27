//! Balance block
//!
//! Opening, income, expenses, profit and closing balance for the months
//! shown in the grid above.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::models::{Money, MonthlyBalance};
use crate::tui::app::App;

use super::grid::{amount_cell, column_widths, month_header, visible_months};

fn signed_style(value: Money) -> Style {
    if value.is_negative() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}

/// Render the balance block
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let months = visible_months(app, area);
    let symbol = app.settings.currency_symbol.as_str();
    let balances: Vec<&MonthlyBalance> = months
        .iter()
        .filter_map(|m| app.store.balances().iter().find(|b| b.month == *m))
        .collect();

    type Field = fn(&MonthlyBalance) -> Money;
    let lines: [(&str, Field, bool); 5] = [
        ("Opening balance", |b| b.opening_balance, false),
        ("Income", |b| b.income, false),
        ("Expenses", |b| b.expenses, false),
        ("Profit", |b| b.profit, true),
        ("Closing balance", |b| b.closing_balance, true),
    ];

    let rows: Vec<Row> = lines
        .iter()
        .map(|(label, field, signed)| {
            let mut cells = vec![Cell::from(*label)];
            cells.extend(balances.iter().map(|b| {
                let value = field(b);
                let style = if *signed {
                    signed_style(value)
                } else {
                    Style::default()
                };
                amount_cell(value, symbol, style)
            }));
            Row::new(cells)
        })
        .collect();

    let block = Block::default()
        .title(" Balances ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let table = Table::new(rows, column_widths(months.len()))
        .header(month_header(&months))
        .block(block);

    frame.render_widget(table, area);
}
