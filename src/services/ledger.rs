//! Ledger store
//!
//! Single owner of the budget ledger. Every applied mutation recomputes the
//! month list and the running balances before returning, then publishes a
//! fresh immutable snapshot to subscribers. Lookups that miss (unknown
//! group or subcategory) leave the store untouched.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::ledger::compute_balances;
use crate::models::{
    BudgetPeriod, BudgetSection, CategoryGroup, CellAddress, GroupId, GroupValues, Ledger, Money,
    MonthKey, MonthlyBalance, RowAddress, SectionId, SubCategory, SubCategoryId,
};

/// Point-in-time view of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub ledger: Ledger,
    pub months: Vec<MonthKey>,
    pub balances: Vec<MonthlyBalance>,
    /// Incremented on every published change
    pub revision: u64,
}

impl LedgerSnapshot {
    fn build(ledger: Ledger, revision: u64) -> Self {
        let months = ledger.period.months();
        let balances = compute_balances(&ledger, &months);
        Self {
            ledger,
            months,
            balances,
            revision,
        }
    }

    /// Balance row for `month`
    pub fn balance(&self, month: MonthKey) -> Option<&MonthlyBalance> {
        self.balances.iter().find(|b| b.month == month)
    }
}

/// Handle returned by [`LedgerStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Arc<LedgerSnapshot>)>;

/// Owner of the ledger and its derived balances
pub struct LedgerStore {
    snapshot: Arc<LedgerSnapshot>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerStore")
            .field("revision", &self.snapshot.revision)
            .field("period", &self.snapshot.ledger.period)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new(Ledger::default())
    }
}

impl LedgerStore {
    /// Create a store around an existing ledger
    pub fn new(ledger: Ledger) -> Self {
        Self {
            snapshot: Arc::new(LedgerSnapshot::build(ledger, 0)),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The default starter ledger over `period`
    pub fn with_defaults(period: BudgetPeriod, opening_balance: Money) -> Self {
        Self::new(Ledger::with_defaults(period, opening_balance))
    }

    // === Reads ===

    /// Current snapshot; never mutated after it is handed out
    pub fn snapshot(&self) -> Arc<LedgerSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.snapshot.ledger
    }

    pub fn months(&self) -> &[MonthKey] {
        &self.snapshot.months
    }

    pub fn balances(&self) -> &[MonthlyBalance] {
        &self.snapshot.balances
    }

    pub fn revision(&self) -> u64 {
        self.snapshot.revision
    }

    /// Value stored at `cell`, `None` if the address does not resolve
    pub fn cell_value(&self, cell: &CellAddress) -> Option<Money> {
        let group = self
            .ledger()
            .section(cell.row.section)
            .group(&cell.row.group)?;
        match (&cell.row.sub_category, &group.values) {
            (Some(sub_id), _) => group.sub_category(sub_id)?.values.get(&cell.month).copied(),
            (None, GroupValues::Direct(values)) => values.get(&cell.month).copied(),
            (None, GroupValues::Aggregated) => None,
        }
    }

    /// Every editable row in display order
    pub fn row_addresses(&self) -> Vec<RowAddress> {
        let mut rows = Vec::new();
        for section in self.ledger().sections() {
            for group in &section.category_groups {
                if group.is_direct() {
                    rows.push(RowAddress::new(section.id, group.id.clone(), None));
                    continue;
                }
                rows.extend(group.sub_categories.iter().map(|sc| {
                    RowAddress::new(section.id, group.id.clone(), Some(sc.id.clone()))
                }));
            }
        }
        rows
    }

    /// Every editable cell in display order, row by row
    pub fn cell_addresses(&self) -> Vec<CellAddress> {
        let months = self.months();
        self.row_addresses()
            .into_iter()
            .flat_map(|row| months.iter().map(move |m| row.cell(*m)))
            .collect()
    }

    // === Derived totals ===

    /// Sum of all of a subcategory's values
    pub fn sub_category_total(sub_category: &SubCategory) -> Money {
        sub_category.total()
    }

    /// Group total for `month`, or across the period when `month` is `None`.
    /// Direct-value groups report their own values.
    pub fn category_group_total(group: &CategoryGroup, month: Option<MonthKey>) -> Money {
        group.total(month)
    }

    /// Section total for `month`, or across the period when `month` is `None`
    pub fn section_total(section: &BudgetSection, month: Option<MonthKey>) -> Money {
        section.total(month)
    }

    // === Subscriptions ===

    /// Register a listener called with every newly published snapshot
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&Arc<LedgerSnapshot>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    // === Mutations ===

    /// Replace the period. Values in months kept by the new range survive,
    /// dropped months are discarded and new months start at zero.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> bool {
        match BudgetPeriod::new(start, end) {
            Ok(period) => self.set_period(period),
            Err(e) => {
                warn!(%start, %end, error = %e, "rejected date range");
                false
            }
        }
    }

    /// Replace the period with an already validated one
    pub fn set_period(&mut self, period: BudgetPeriod) -> bool {
        self.mutate("set_period", true, |ledger| {
            ledger.rebase(period);
            true
        })
    }

    /// Replace the opening balance of the first month
    pub fn set_opening_balance(&mut self, value: Money) -> bool {
        self.mutate("set_opening_balance", true, |ledger| {
            ledger.opening_balance = value;
            true
        })
    }

    /// Append an empty aggregated group to a section
    pub fn add_category_group(&mut self, section: SectionId, name: &str) -> GroupId {
        self.push_group(section, name, |id| CategoryGroup::new(id, name))
    }

    /// Append a group that carries its own per-month values
    pub fn add_direct_value_group(&mut self, section: SectionId, name: &str) -> GroupId {
        let months = self.months().to_vec();
        self.push_group(section, name, |id| CategoryGroup::direct(id, name, &months))
    }

    fn push_group(
        &mut self,
        section: SectionId,
        name: &str,
        build: impl FnOnce(GroupId) -> CategoryGroup,
    ) -> GroupId {
        let groups = &self.ledger().section(section).category_groups;
        let id = GroupId::generate(name, groups.iter().map(|g| &g.id));
        let group = build(id.clone());

        // An empty aggregated group contributes nothing, so balances carry over
        let recompute = group.is_direct();
        self.mutate("add_category_group", recompute, |ledger| {
            ledger.section_mut(section).category_groups.push(group);
            true
        });
        id
    }

    /// Append a zeroed subcategory to a group, flagged as new.
    /// Returns `None` when the group does not exist or carries its own values.
    pub fn add_sub_category(
        &mut self,
        section: SectionId,
        group_id: &GroupId,
        name: &str,
    ) -> Option<SubCategoryId> {
        let group = self.ledger().section(section).group(group_id)?;
        if group.is_direct() {
            debug!(group = %group_id, "direct-value groups take no subcategories");
            return None;
        }
        let id = SubCategoryId::generate(name, group.sub_categories.iter().map(|sc| &sc.id));
        let mut sub_category = SubCategory::new(id.clone(), name, self.months());
        sub_category.is_new = true;

        self.mutate("add_sub_category", true, |ledger| {
            match ledger.section_mut(section).group_mut(group_id) {
                Some(group) if !group.is_direct() => {
                    group.sub_categories.push(sub_category);
                    true
                }
                _ => false,
            }
        })
        .then_some(id)
    }

    /// Remove a subcategory
    pub fn delete_sub_category(
        &mut self,
        section: SectionId,
        group_id: &GroupId,
        sub_category_id: &SubCategoryId,
    ) -> bool {
        self.mutate("delete_sub_category", true, |ledger| {
            let Some(group) = ledger.section_mut(section).group_mut(group_id) else {
                return false;
            };
            let before = group.sub_categories.len();
            group.sub_categories.retain(|sc| &sc.id != sub_category_id);
            group.sub_categories.len() != before
        })
    }

    /// Set one subcategory value. Months outside the period are ignored.
    pub fn set_cell_value(
        &mut self,
        section: SectionId,
        group_id: &GroupId,
        sub_category_id: &SubCategoryId,
        month: MonthKey,
        value: Money,
    ) -> bool {
        self.mutate("set_cell_value", true, |ledger| {
            ledger
                .section_mut(section)
                .group_mut(group_id)
                .and_then(|g| g.sub_category_mut(sub_category_id))
                .and_then(|sc| sc.values.get_mut(&month))
                .map(|slot| *slot = value)
                .is_some()
        })
    }

    /// Set a direct-value group's value for one month
    pub fn set_group_value(
        &mut self,
        section: SectionId,
        group_id: &GroupId,
        month: MonthKey,
        value: Money,
    ) -> bool {
        self.mutate("set_group_value", true, |ledger| {
            match ledger
                .section_mut(section)
                .group_mut(group_id)
                .map(|g| &mut g.values)
            {
                Some(GroupValues::Direct(values)) => {
                    values.get_mut(&month).map(|slot| *slot = value).is_some()
                }
                _ => false,
            }
        })
    }

    /// Set whatever value `cell` addresses
    pub fn set_cell(&mut self, cell: &CellAddress, value: Money) -> bool {
        let row = &cell.row;
        match &row.sub_category {
            Some(sub_id) => self.set_cell_value(row.section, &row.group, sub_id, cell.month, value),
            None => self.set_group_value(row.section, &row.group, cell.month, value),
        }
    }

    /// Set `value` for every month of a subcategory
    pub fn apply_value_to_all_months(
        &mut self,
        section: SectionId,
        group_id: &GroupId,
        sub_category_id: &SubCategoryId,
        value: Money,
    ) -> bool {
        self.mutate("apply_value_to_all_months", true, |ledger| {
            let Some(sub_category) = ledger
                .section_mut(section)
                .group_mut(group_id)
                .and_then(|g| g.sub_category_mut(sub_category_id))
            else {
                return false;
            };
            sub_category.values.values_mut().for_each(|v| *v = value);
            true
        })
    }

    /// Set `value` for every month of the row `row` addresses
    pub fn apply_to_row(&mut self, row: &RowAddress, value: Money) -> bool {
        match &row.sub_category {
            Some(sub_id) => self.apply_value_to_all_months(row.section, &row.group, sub_id, value),
            None => self.mutate("apply_to_row", true, |ledger| {
                match ledger
                    .section_mut(row.section)
                    .group_mut(&row.group)
                    .map(|g| &mut g.values)
                {
                    Some(GroupValues::Direct(values)) => {
                        values.values_mut().for_each(|v| *v = value);
                        true
                    }
                    _ => false,
                }
            }),
        }
    }

    /// Clear the newly-created flag on every subcategory
    pub fn clear_new_flags(&mut self) -> bool {
        let any_new = self.ledger().sections().iter().any(|s| {
            s.category_groups
                .iter()
                .any(|g| g.sub_categories.iter().any(|sc| sc.is_new))
        });
        if !any_new {
            return false;
        }
        self.mutate("clear_new_flags", false, |ledger| {
            for section in [&mut ledger.income, &mut ledger.expenses] {
                for group in &mut section.category_groups {
                    for sub_category in &mut group.sub_categories {
                        sub_category.is_new = false;
                    }
                }
            }
            true
        })
    }

    /// Recompute months and running balances and publish the result
    pub fn recompute_balances(&mut self) {
        let ledger = self.snapshot.ledger.clone();
        self.publish(ledger, true);
    }

    /// Apply `op` to a copy of the ledger and publish it if `op` reports a change
    fn mutate(
        &mut self,
        name: &'static str,
        recompute: bool,
        op: impl FnOnce(&mut Ledger) -> bool,
    ) -> bool {
        let mut ledger = self.snapshot.ledger.clone();
        if !op(&mut ledger) {
            debug!(operation = name, "mutation had no target; ledger unchanged");
            return false;
        }
        self.publish(ledger, recompute);
        debug!(operation = name, revision = self.snapshot.revision, "ledger updated");
        true
    }

    fn publish(&mut self, ledger: Ledger, recompute: bool) {
        let revision = self.snapshot.revision + 1;
        let snapshot = if recompute {
            LedgerSnapshot::build(ledger, revision)
        } else {
            LedgerSnapshot {
                ledger,
                months: self.snapshot.months.clone(),
                balances: self.snapshot.balances.clone(),
                revision,
            }
        };
        self.snapshot = Arc::new(snapshot);

        for (_, listener) in &mut self.listeners {
            listener(&self.snapshot);
        }
    }
}
