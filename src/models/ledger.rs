//! Budget ledger tree
//!
//! A ledger holds an income and an expenses section. Each section holds
//! ordered category groups, and each group holds ordered subcategories with
//! one value per month of the active period.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::{GroupId, SectionId, SubCategoryId};
use super::money::Money;
use super::month::{BudgetPeriod, MonthKey};

/// Per-month values of one row
pub type MonthValues = BTreeMap<MonthKey, Money>;

/// Zero for every month in `months`
pub fn empty_month_values(months: &[MonthKey]) -> MonthValues {
    months.iter().map(|m| (*m, Money::zero())).collect()
}

/// Rebuild `values` against `months`, keeping overlapping entries
pub fn rebase_month_values(values: &MonthValues, months: &[MonthKey]) -> MonthValues {
    months
        .iter()
        .map(|m| (*m, values.get(m).copied().unwrap_or_default()))
        .collect()
}

/// A single budget line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub name: String,
    pub values: MonthValues,
    /// Set on creation so the UI can highlight the new row
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_new: bool,
}

impl SubCategory {
    /// Create a subcategory with every month at zero
    pub fn new(id: SubCategoryId, name: impl Into<String>, months: &[MonthKey]) -> Self {
        Self {
            id,
            name: name.into(),
            values: empty_month_values(months),
            is_new: false,
        }
    }

    /// Value for `month`, zero when the month is outside the period
    pub fn value(&self, month: MonthKey) -> Money {
        self.values.get(&month).copied().unwrap_or_default()
    }

    /// Sum of every month
    pub fn total(&self) -> Money {
        self.values.values().sum()
    }
}

/// How a group arrives at its totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum GroupValues {
    /// Totals are the sum of the subcategories
    Aggregated,
    /// Group-level values that replace subcategory aggregation
    Direct(MonthValues),
}

/// A named cluster of subcategories within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: GroupId,
    pub name: String,
    pub sub_categories: Vec<SubCategory>,
    pub values: GroupValues,
}

impl CategoryGroup {
    /// Create an empty aggregated group
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sub_categories: Vec::new(),
            values: GroupValues::Aggregated,
        }
    }

    /// Create a group carrying its own per-month values
    pub fn direct(id: GroupId, name: impl Into<String>, months: &[MonthKey]) -> Self {
        Self {
            id,
            name: name.into(),
            sub_categories: Vec::new(),
            values: GroupValues::Direct(empty_month_values(months)),
        }
    }

    /// Builder-style helper used for the default ledger
    fn with_sub_categories(mut self, rows: &[(&str, &str)], months: &[MonthKey]) -> Self {
        self.sub_categories = rows
            .iter()
            .map(|(id, name)| SubCategory::new(SubCategoryId::new(*id), *name, months))
            .collect();
        self
    }

    pub fn is_direct(&self) -> bool {
        matches!(self.values, GroupValues::Direct(_))
    }

    pub fn sub_category(&self, id: &SubCategoryId) -> Option<&SubCategory> {
        self.sub_categories.iter().find(|sc| &sc.id == id)
    }

    pub fn sub_category_mut(&mut self, id: &SubCategoryId) -> Option<&mut SubCategory> {
        self.sub_categories.iter_mut().find(|sc| &sc.id == id)
    }

    /// Group total for one month, or across all months when `month` is `None`
    pub fn total(&self, month: Option<MonthKey>) -> Money {
        match (&self.values, month) {
            (GroupValues::Direct(values), Some(month)) => {
                values.get(&month).copied().unwrap_or_default()
            }
            (GroupValues::Direct(values), None) => values.values().sum(),
            (GroupValues::Aggregated, Some(month)) => {
                self.sub_categories.iter().map(|sc| sc.value(month)).sum()
            }
            (GroupValues::Aggregated, None) => {
                self.sub_categories.iter().map(SubCategory::total).sum()
            }
        }
    }

    /// Rebuild every value map against a new month list
    fn rebase(&mut self, months: &[MonthKey]) {
        for sub_category in &mut self.sub_categories {
            sub_category.values = rebase_month_values(&sub_category.values, months);
        }
        if let GroupValues::Direct(values) = &mut self.values {
            *values = rebase_month_values(values, months);
        }
    }
}

/// Income or expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSection {
    pub id: SectionId,
    pub category_groups: Vec<CategoryGroup>,
}

impl BudgetSection {
    pub fn new(id: SectionId) -> Self {
        Self {
            id,
            category_groups: Vec::new(),
        }
    }

    pub fn group(&self, id: &GroupId) -> Option<&CategoryGroup> {
        self.category_groups.iter().find(|g| &g.id == id)
    }

    pub fn group_mut(&mut self, id: &GroupId) -> Option<&mut CategoryGroup> {
        self.category_groups.iter_mut().find(|g| &g.id == id)
    }

    /// Section total for one month, or across all months when `month` is `None`
    pub fn total(&self, month: Option<MonthKey>) -> Money {
        self.category_groups.iter().map(|g| g.total(month)).sum()
    }
}

/// The full budget data tree for one date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub period: BudgetPeriod,
    pub income: BudgetSection,
    pub expenses: BudgetSection,
    pub opening_balance: Money,
}

impl Ledger {
    /// An empty ledger over `period`
    pub fn empty(period: BudgetPeriod, opening_balance: Money) -> Self {
        Self {
            period,
            income: BudgetSection::new(SectionId::Income),
            expenses: BudgetSection::new(SectionId::Expenses),
            opening_balance,
        }
    }

    /// The starter ledger: two income groups and two expense groups
    pub fn with_defaults(period: BudgetPeriod, opening_balance: Money) -> Self {
        let months = period.months();
        let mut ledger = Self::empty(period, opening_balance);

        ledger.income.category_groups = vec![
            CategoryGroup::new(GroupId::new("revenue"), "Revenue").with_sub_categories(
                &[
                    ("general-income", "General Income"),
                    ("sales", "Sales"),
                    ("commission", "Commission"),
                ],
                &months,
            ),
            CategoryGroup::new(GroupId::new("other-income"), "Other Income").with_sub_categories(
                &[("training", "Training"), ("consulting", "Consulting")],
                &months,
            ),
        ];

        ledger.expenses.category_groups = vec![
            CategoryGroup::new(GroupId::new("operating"), "Operating").with_sub_categories(
                &[
                    ("operational-expenses", "Operational Expenses"),
                    ("management-fees", "Management Fees"),
                    ("cloud-hosting", "Cloud Hosting"),
                ],
                &months,
            ),
            CategoryGroup::new(GroupId::new("salaries-wages"), "Salaries & Wages")
                .with_sub_categories(
                    &[
                        ("full-time-dev", "Full Time Dev Salaries"),
                        ("part-time-dev", "Part Time Dev Salaries"),
                        ("remote-salaries", "Remote Salaries"),
                    ],
                    &months,
                ),
        ];

        ledger
    }

    pub fn section(&self, id: SectionId) -> &BudgetSection {
        match id {
            SectionId::Income => &self.income,
            SectionId::Expenses => &self.expenses,
        }
    }

    pub fn section_mut(&mut self, id: SectionId) -> &mut BudgetSection {
        match id {
            SectionId::Income => &mut self.income,
            SectionId::Expenses => &mut self.expenses,
        }
    }

    /// Both sections in display order
    pub fn sections(&self) -> [&BudgetSection; 2] {
        [&self.income, &self.expenses]
    }

    /// Replace the period and rebuild every value map against it
    pub fn rebase(&mut self, period: BudgetPeriod) {
        self.period = period;
        let months = period.months();
        for section in [&mut self.income, &mut self.expenses] {
            for group in &mut section.category_groups {
                group.rebase(&months);
            }
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_defaults(BudgetPeriod::default(), Money::zero())
    }
}

/// Derived per-month rollup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    pub month: MonthKey,
    pub opening_balance: Money,
    pub income: Money,
    pub expenses: Money,
    pub profit: Money,
    pub closing_balance: Money,
}

/// Walk `months` in order, carrying each closing balance into the next month
pub fn compute_balances(ledger: &Ledger, months: &[MonthKey]) -> Vec<MonthlyBalance> {
    let mut carried = ledger.opening_balance;
    months
        .iter()
        .map(|&month| {
            let income = ledger.income.total(Some(month));
            let expenses = ledger.expenses.total(Some(month));
            let profit = income - expenses;
            let balance = MonthlyBalance {
                month,
                opening_balance: carried,
                income,
                expenses,
                profit,
                closing_balance: carried + profit,
            };
            carried = balance.closing_balance;
            balance
        })
        .collect()
}
