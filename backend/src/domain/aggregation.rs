//! Aggregation engine: sums records along one grouping dimension.
//!
//! Totals are accumulated in integer cents inside ordered maps, so the result
//! for a given record set is identical whatever order the records arrive in.

use std::collections::BTreeMap;

use crate::domain::models::{AccountType, CategoryKey, FinancialRecord};
use crate::domain::money::Cents;
use crate::domain::time_window::YearMonth;

/// Dimension to group records by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Category,
    Month,
    AccountType,
    Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Category(CategoryKey),
    Month(YearMonth),
    AccountType(AccountType),
    Owner(String),
}

impl GroupKey {
    pub fn of(record: &FinancialRecord, group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::Category => GroupKey::Category(record.category.key()),
            // A record belongs to exactly one month, the one its date falls in
            GroupBy::Month => GroupKey::Month(YearMonth::of(record.date)),
            GroupBy::AccountType => GroupKey::AccountType(record.account_type),
            GroupBy::Owner => GroupKey::Owner(record.owner_id.clone()),
        }
    }
}

/// Summed amounts keyed by group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    totals: BTreeMap<GroupKey, Cents>,
}

impl Aggregate {
    /// Total for a key, zero when no record fell into it
    pub fn get(&self, key: &GroupKey) -> Cents {
        self.totals.get(key).copied().unwrap_or(Cents::ZERO)
    }

    pub fn total(&self) -> Cents {
        self.totals.values().sum()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, Cents)> {
        self.totals.iter().map(|(k, v)| (k, *v))
    }
}

pub fn aggregate(records: &[FinancialRecord], group_by: GroupBy) -> Aggregate {
    let mut totals: BTreeMap<GroupKey, Cents> = BTreeMap::new();
    for record in records {
        *totals.entry(GroupKey::of(record, group_by)).or_default() += record.amount;
    }
    Aggregate { totals }
}

pub fn total(records: &[FinancialRecord]) -> Cents {
    records.iter().map(|r| r.amount).sum()
}

/// Category total carrying the display name of the category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAmount {
    pub key: CategoryKey,
    pub name: String,
    pub total: Cents,
}

/// Totals per category, largest first; ties broken by name then id
pub fn category_breakdown(records: &[FinancialRecord]) -> Vec<CategoryAmount> {
    let mut names: BTreeMap<CategoryKey, String> = BTreeMap::new();
    for record in records {
        names
            .entry(record.category.key())
            .or_insert_with(|| record.category.name().to_string());
    }

    let mut breakdown: Vec<CategoryAmount> = aggregate(records, GroupBy::Category)
        .iter()
        .filter_map(|(key, total)| match key {
            GroupKey::Category(category) => Some(CategoryAmount {
                name: names.get(category).cloned().unwrap_or_default(),
                key: category.clone(),
                total,
            }),
            _ => None,
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.key.cmp(&b.key))
    });
    breakdown
}
