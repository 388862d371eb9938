//! Couple contribution splitting over shared ("Commune") expenses.

use tracing::warn;

use crate::domain::models::{AccountType, FinancialRecord, RecordKind};
use crate::domain::money::Cents;
use crate::domain::time_window::Period;

/// How shared expenses were paid between two partners
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSplit {
    pub total_commune: Cents,
    pub contribution_a: Cents,
    pub contribution_b: Cents,
    /// Half of the shared total, in euros
    pub theoretical_share: f64,
    /// `contribution_a - theoretical_share` in euros; negative means A owes B
    pub gap_a: f64,
}

impl ContributionSplit {
    pub fn empty() -> Self {
        Self {
            total_commune: Cents::ZERO,
            contribution_a: Cents::ZERO,
            contribution_b: Cents::ZERO,
            theoretical_share: 0.0,
            gap_a: 0.0,
        }
    }

    /// Partner B's deviation, the mirror of `gap_a`
    pub fn gap_b(&self) -> f64 {
        if self.total_commune.is_zero() {
            return 0.0;
        }
        self.contribution_b.to_euros() - self.theoretical_share
    }
}

/// Split the Commune expenses of `period` between `user_a` and `user_b`.
///
/// Non-Commune records and records outside the period are ignored. A Commune
/// expense owned by neither user is excluded and logged.
pub fn split_contributions(
    records: &[FinancialRecord],
    period: &Period,
    user_a: &str,
    user_b: &str,
) -> ContributionSplit {
    let mut contribution_a = Cents::ZERO;
    let mut contribution_b = Cents::ZERO;

    let commune = records.iter().filter(|r| {
        r.kind == RecordKind::Expense
            && r.account_type == AccountType::Commune
            && period.contains(r.date)
    });

    for record in commune {
        if record.owner_id == user_a {
            contribution_a += record.amount;
        } else if record.owner_id == user_b {
            contribution_b += record.amount;
        } else {
            warn!(
                "Shared expense {} is owned by {}, neither {} nor {}; excluded from split",
                record.id, record.owner_id, user_a, user_b
            );
        }
    }

    let total_commune = contribution_a + contribution_b;
    if total_commune.is_zero() {
        return ContributionSplit::empty();
    }

    let theoretical_share = total_commune.to_euros() / 2.0;
    ContributionSplit {
        total_commune,
        contribution_a,
        contribution_b,
        theoretical_share,
        gap_a: contribution_a.to_euros() - theoretical_share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AccountType::{Commune, Conjoint, Perso};
    use crate::domain::time_window::month_window;
    use crate::storage::test_utils::{expense, income};

    fn march() -> Period {
        month_window(2024, 3).unwrap()
    }

    #[test]
    fn test_split_scenario_partner_owes_caller() {
        let records = vec![
            expense("a1", "alice", 40.0, "2024-03-03", Commune, "food"),
            expense("a2", "alice", 60.0, "2024-03-18", Commune, "home"),
            expense("b1", "bob", 50.0, "2024-03-10", Commune, "food"),
        ];

        let split = split_contributions(&records, &march(), "alice", "bob");

        assert_eq!(split.total_commune, Cents::new(15_000));
        assert_eq!(split.contribution_a, Cents::new(10_000));
        assert_eq!(split.contribution_b, Cents::new(5_000));
        assert_eq!(split.theoretical_share, 75.0);
        assert_eq!(split.gap_a, 25.0);
        assert_eq!(split.gap_b(), -25.0);
    }

    #[test]
    fn test_split_without_commune_expenses_is_all_zero() {
        let records = vec![
            expense("a1", "alice", 40.0, "2024-03-03", Perso, "food"),
            expense("b1", "bob", 50.0, "2024-03-10", Conjoint, "food"),
        ];

        let split = split_contributions(&records, &march(), "alice", "bob");

        assert_eq!(split, ContributionSplit::empty());
        assert_eq!(split.gap_b(), 0.0);
    }

    #[test]
    fn test_split_ignores_other_periods_and_incomes() {
        let records = vec![
            expense("a1", "alice", 40.0, "2024-02-29", Commune, "food"),
            expense("a2", "alice", 10.0, "2024-03-31", Commune, "food"),
            income("i1", "bob", 1000.0, "2024-03-05", Perso, "salary"),
        ];

        let split = split_contributions(&records, &march(), "alice", "bob");

        assert_eq!(split.total_commune, Cents::new(1_000));
        assert_eq!(split.contribution_b, Cents::ZERO);
        assert_eq!(split.gap_a, 5.0);
    }

    #[test]
    fn test_split_excludes_expenses_owned_by_a_third_user() {
        let records = vec![
            expense("a1", "alice", 30.0, "2024-03-03", Commune, "food"),
            expense("x1", "former", 99.0, "2024-03-04", Commune, "food"),
            expense("b1", "bob", 10.0, "2024-03-05", Commune, "food"),
        ];

        let split = split_contributions(&records, &march(), "alice", "bob");

        assert_eq!(split.total_commune, Cents::new(4_000));
        assert_eq!(split.contribution_a + split.contribution_b, split.total_commune);
    }

    #[test]
    fn test_split_is_idempotent() {
        let records = vec![
            expense("a1", "alice", 33.33, "2024-03-03", Commune, "food"),
            expense("b1", "bob", 0.01, "2024-03-05", Commune, "food"),
        ];

        let first = split_contributions(&records, &march(), "alice", "bob");
        let second = split_contributions(&records, &march(), "alice", "bob");

        assert_eq!(first, second);
        assert_eq!(first.contribution_a + first.contribution_b, first.total_commune);
        assert!((first.theoretical_share - 16.67).abs() < 1e-9);
    }
}
