//! Ledger grid formatting
//!
//! Prints the spreadsheet view: one line per subcategory (or direct-value
//! group), group subtotals and section totals, with a column per month and
//! a trailing total.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::models::{BudgetSection, CategoryGroup, Money, MonthKey};
use crate::services::LedgerSnapshot;

/// Format the full ledger as a month-by-row table
pub fn format_ledger_table(snapshot: &LedgerSnapshot, symbol: &str) -> String {
    let months = &snapshot.months;
    let mut builder = Builder::default();

    let mut header = vec!["Row".to_string()];
    header.extend(months.iter().map(MonthKey::short_label));
    header.push("Total".to_string());
    builder.push_record(header);

    for section in snapshot.ledger.sections() {
        push_section(&mut builder, section, months, symbol);
    }

    let mut table = builder.build();
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

fn push_section(builder: &mut Builder, section: &BudgetSection, months: &[MonthKey], symbol: &str) {
    for group in &section.category_groups {
        push_group(builder, group, months, symbol);
    }
    builder.push_record(amount_row(
        format!("Total {}", section.id.title()),
        months.iter().map(|m| section.total(Some(*m))),
        section.total(None),
        symbol,
    ));
}

fn push_group(builder: &mut Builder, group: &CategoryGroup, months: &[MonthKey], symbol: &str) {
    if group.is_direct() {
        builder.push_record(amount_row(
            group.name.clone(),
            months.iter().map(|m| group.total(Some(*m))),
            group.total(None),
            symbol,
        ));
        return;
    }

    let mut title = vec![group.name.clone()];
    title.resize(months.len() + 2, String::new());
    builder.push_record(title);

    for sub_category in &group.sub_categories {
        builder.push_record(amount_row(
            format!("  {}", sub_category.name),
            months.iter().map(|m| sub_category.value(*m)),
            sub_category.total(),
            symbol,
        ));
    }

    builder.push_record(amount_row(
        format!("  {} subtotal", group.name),
        months.iter().map(|m| group.total(Some(*m))),
        group.total(None),
        symbol,
    ));
}

fn amount_row(
    label: String,
    values: impl Iterator<Item = Money>,
    total: Money,
    symbol: &str,
) -> Vec<String> {
    let mut row = vec![label];
    row.extend(values.map(|v| v.format_with_symbol(symbol)));
    row.push(total.format_with_symbol(symbol));
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupId, SectionId, SubCategoryId};
    use crate::services::LedgerStore;

    #[test]
    fn test_table_has_rows_and_totals() {
        let mut store = LedgerStore::default();
        let jan = MonthKey::new(2024, 1).unwrap();
        store.set_cell_value(
            SectionId::Income,
            &GroupId::new("revenue"),
            &SubCategoryId::new("sales"),
            jan,
            Money::from_units(1000),
        );

        let output = format_ledger_table(&store.snapshot(), "$");
        assert!(output.contains("Jan 24"));
        assert!(output.contains("Sales"));
        assert!(output.contains("Revenue subtotal"));
        assert!(output.contains("Total Income"));
        assert!(output.contains("Total Expenses"));
        assert!(output.contains("$1000.00"));
    }
}
