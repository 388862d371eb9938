//! Month-over-month comparison of category totals.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::aggregation::CategoryAmount;
use crate::domain::models::CategoryKey;
use crate::domain::money::Cents;

/// Relative change between two periods.
///
/// A category with nothing spent in the previous period has no finite
/// percentage; it is reported as `New`, which exceeds every threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentChange {
    Finite(f64),
    New,
}

impl PercentChange {
    pub fn exceeds(&self, threshold_percent: f64) -> bool {
        match self {
            PercentChange::Finite(value) => *value > threshold_percent,
            PercentChange::New => true,
        }
    }

    pub fn as_finite(&self) -> Option<f64> {
        match self {
            PercentChange::Finite(value) => Some(*value),
            PercentChange::New => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTrend {
    pub key: CategoryKey,
    pub name: String,
    pub current_total: Cents,
    pub previous_total: Cents,
    pub percent_change: PercentChange,
    pub absolute_change: Cents,
}

fn percent_change(current: Cents, previous: Cents) -> PercentChange {
    if previous.is_zero() {
        return PercentChange::New;
    }
    let delta = (current - previous).as_i64() as f64;
    PercentChange::Finite(delta / previous.as_i64() as f64 * 100.0)
}

/// Categories whose total rose by more than `threshold_percent`.
///
/// Only categories with spending in the current period are candidates.
/// Results are sorted by absolute change, largest first.
pub fn compare_months(
    current: &[CategoryAmount],
    previous: &[CategoryAmount],
    threshold_percent: f64,
) -> Vec<CategoryTrend> {
    let previous_totals: BTreeMap<&CategoryKey, Cents> =
        previous.iter().map(|c| (&c.key, c.total)).collect();

    let mut rising: Vec<CategoryTrend> = current
        .iter()
        .filter(|c| c.total > Cents::ZERO)
        .filter_map(|c| {
            let previous_total = previous_totals.get(&c.key).copied().unwrap_or(Cents::ZERO);
            let absolute_change = c.total - previous_total;
            let percent_change = percent_change(c.total, previous_total);

            (absolute_change > Cents::ZERO && percent_change.exceeds(threshold_percent)).then(|| {
                CategoryTrend {
                    key: c.key.clone(),
                    name: c.name.clone(),
                    current_total: c.total,
                    previous_total,
                    percent_change,
                    absolute_change,
                }
            })
        })
        .collect();

    rising.sort_by(|a, b| match b.absolute_change.cmp(&a.absolute_change) {
        Ordering::Equal => a.name.cmp(&b.name).then_with(|| a.key.cmp(&b.key)),
        other => other,
    });
    rising
}
