//! Statistics service: assembles the reports from the core components.
//!
//! Each method resolves the caller (and partner when the report scope asks for
//! one), fetches the records it needs once, and composes aggregation, splitting
//! and trend analysis. Nothing is cached between calls.

use std::sync::Arc;
use tracing::info;

use crate::domain::aggregation::{aggregate, category_breakdown, total, GroupBy, GroupKey};
use crate::domain::commands::reports::{
    CategoryDistributionQuery, ComparisonQuery, CoupleMonthQuery, MonthlyBalanceQuery,
    MonthlyEvolutionQuery, MonthlySynthesisQuery,
};
use crate::domain::commands::scope::Scope;
use crate::domain::contribution::split_contributions;
use crate::domain::errors::{StatsError, StatsResult};
use crate::domain::models::{AccountType, FinancialRecord, RecordKind, User};
use crate::domain::partner_resolver::PartnerResolver;
use crate::domain::record_store::RecordStore;
use crate::domain::reports::{
    CategoryDistribution, ComparisonSummary, CoupleContributions, FixedCharges, MonthTotals,
    MonthlyBalance, MonthlyEvolution, MonthlySynthesis, PartnerContribution, UserMonthTotals,
};
use crate::domain::time_window::{last_n_months, Period};
use crate::domain::trend::compare_months;
use crate::storage::Connection;

/// Who a report covers once the partner link has been resolved
struct Audience {
    caller: User,
    partner: Option<User>,
    /// Effective scope; falls back to `SelfOnly` when no partner is linked
    scope: Scope,
    no_partner: bool,
}

impl Audience {
    fn owner_ids(&self) -> Vec<String> {
        match (self.scope, &self.partner) {
            (Scope::PartnerOnly, Some(partner)) => vec![partner.id.clone()],
            (Scope::Couple, Some(partner)) => vec![self.caller.id.clone(), partner.id.clone()],
            _ => vec![self.caller.id.clone()],
        }
    }
}

#[derive(Clone)]
pub struct StatisticsService<C: Connection> {
    record_store: RecordStore<C>,
    partner_resolver: PartnerResolver<C>,
}

impl<C: Connection> StatisticsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            record_store: RecordStore::new(connection.clone()),
            partner_resolver: PartnerResolver::new(connection),
        }
    }

    async fn audience(&self, caller_id: &str, requested: Scope) -> StatsResult<Audience> {
        let caller = self.partner_resolver.authenticate(caller_id).await?;
        let partner = self.partner_resolver.partner_of(&caller).await?;

        let no_partner = requested.needs_partner() && partner.is_none();
        let scope = if no_partner {
            info!(
                "User {} has no linked partner; '{}' report limited to own records",
                caller.id,
                requested.label()
            );
            Scope::SelfOnly
        } else {
            requested
        };

        Ok(Audience {
            caller,
            partner,
            scope,
            no_partner,
        })
    }

    async fn fetch(
        &self,
        audience: &Audience,
        kind: RecordKind,
        period: &Period,
    ) -> StatsResult<Vec<FinancialRecord>> {
        self.record_store
            .fetch_records(&audience.owner_ids(), kind, Some(period), None)
            .await
    }

    fn build_contributions(
        caller: &User,
        partner: &User,
        period: &Period,
        expenses: &[FinancialRecord],
    ) -> CoupleContributions {
        let split = split_contributions(expenses, period, &caller.id, &partner.id);
        CoupleContributions {
            period: *period,
            caller: PartnerContribution {
                user: caller.clone(),
                total_expenses: split.contribution_a,
            },
            partner: PartnerContribution {
                user: partner.clone(),
                total_expenses: split.contribution_b,
            },
            split,
        }
    }

    /// Expense and income totals of a month, with expenses broken down by account type
    pub async fn monthly_balance(&self, query: MonthlyBalanceQuery) -> StatsResult<MonthlyBalance> {
        info!(
            "Computing monthly balance for {} ({}, {:?})",
            query.caller_id, query.month, query.context
        );
        let audience = self.audience(&query.caller_id, query.context.into()).await?;
        let period = query.month.window();

        let expenses = self.fetch(&audience, RecordKind::Expense, &period).await?;
        let incomes = self.fetch(&audience, RecordKind::Income, &period).await?;

        let by_account_type = aggregate(&expenses, GroupBy::AccountType);
        let expenses_by_account_type = AccountType::ALL
            .iter()
            .map(|t| (*t, by_account_type.get(&GroupKey::AccountType(*t))))
            .collect();

        let total_expenses = total(&expenses);
        let total_incomes = total(&incomes);

        Ok(MonthlyBalance {
            period,
            scope: audience.scope,
            total_expenses,
            total_incomes,
            balance: total_incomes - total_expenses,
            expenses_by_account_type,
            no_partner: audience.no_partner,
        })
    }

    /// Per-category totals of a month for the pie chart
    pub async fn category_distribution(
        &self,
        query: CategoryDistributionQuery,
    ) -> StatsResult<CategoryDistribution> {
        let requested = match query.kind {
            RecordKind::Expense => Scope::from(query.view),
            RecordKind::Income => Scope::from(query.context),
        };
        info!(
            "Computing {:?} distribution for {} ({}, {})",
            query.kind,
            query.caller_id,
            query.month,
            requested.label()
        );

        let audience = self.audience(&query.caller_id, requested).await?;
        let period = query.month.window();
        let records = self.fetch(&audience, query.kind, &period).await?;

        Ok(CategoryDistribution {
            period,
            kind: query.kind,
            scope: audience.scope,
            categories: category_breakdown(&records),
            total: total(&records),
            no_partner: audience.no_partner,
        })
    }

    /// Expense categories that rose versus the previous month
    pub async fn comparison_summary(&self, query: ComparisonQuery) -> StatsResult<ComparisonSummary> {
        info!(
            "Comparing {} with previous month for {} (threshold {}%)",
            query.month, query.caller_id, query.threshold_percent
        );
        let audience = self.audience(&query.caller_id, query.view.into()).await?;
        let current_period = query.month.window();
        let previous_period = query.month.previous().window();

        let expenses = self
            .fetch(&audience, RecordKind::Expense, &previous_period.span(&current_period))
            .await?;
        let (current, previous): (Vec<_>, Vec<_>) = expenses
            .into_iter()
            .partition(|r| current_period.contains(r.date));

        let rising = compare_months(
            &category_breakdown(&current),
            &category_breakdown(&previous),
            query.threshold_percent,
        );

        Ok(ComparisonSummary {
            current_period,
            previous_period,
            scope: audience.scope,
            current_total: total(&current),
            previous_total: total(&previous),
            threshold_percent: query.threshold_percent,
            rising,
            no_partner: audience.no_partner,
        })
    }

    /// Split of the month's shared expenses between caller and partner.
    ///
    /// Meaningless without a partner, so an unlinked caller gets `NoPartnerLinked`.
    pub async fn couple_contributions(
        &self,
        query: CoupleMonthQuery,
    ) -> StatsResult<CoupleContributions> {
        info!("Computing couple contributions for {} ({})", query.caller_id, query.month);
        let audience = self.audience(&query.caller_id, Scope::Couple).await?;
        let Some(partner) = audience.partner.clone() else {
            return Err(StatsError::NoPartnerLinked(audience.caller.id));
        };

        let period = query.month.window();
        let shared = self
            .record_store
            .fetch_records(
                &audience.owner_ids(),
                RecordKind::Expense,
                Some(&period),
                Some(AccountType::Commune),
            )
            .await?;

        let contributions = Self::build_contributions(&audience.caller, &partner, &period, &shared);
        info!(
            "Shared expenses {}: {} paid {}, {} paid {}",
            contributions.split.total_commune,
            contributions.caller.user.id,
            contributions.caller.total_expenses,
            contributions.partner.user.id,
            contributions.partner.total_expenses
        );
        Ok(contributions)
    }

    /// Recurring expenses of the month, split by who paid them
    pub async fn fixed_charges(&self, query: CoupleMonthQuery) -> StatsResult<FixedCharges> {
        info!("Listing fixed charges for {} ({})", query.caller_id, query.month);
        let audience = self.audience(&query.caller_id, Scope::Couple).await?;
        let period = query.month.window();

        let expenses = self.fetch(&audience, RecordKind::Expense, &period).await?;
        let (caller_charges, partner_charges): (Vec<_>, Vec<_>) = expenses
            .into_iter()
            .filter(|r| r.is_recurring)
            .partition(|r| r.owner_id == audience.caller.id);

        let caller_total = total(&caller_charges);
        let partner_total = total(&partner_charges);

        Ok(FixedCharges {
            period,
            caller_charges,
            partner_charges,
            caller_total,
            partner_total,
            couple_total: caller_total + partner_total,
            no_partner: audience.no_partner,
        })
    }

    /// Combined monthly report: per-user totals, global balance, recurring
    /// expenses, shared-expense split and rising categories
    pub async fn monthly_synthesis(
        &self,
        query: MonthlySynthesisQuery,
    ) -> StatsResult<MonthlySynthesis> {
        info!("Computing monthly synthesis for {} ({})", query.caller_id, query.month);
        let audience = self.audience(&query.caller_id, Scope::Couple).await?;
        let period = query.month.window();
        let previous_period = query.month.previous().window();

        let expenses = self
            .fetch(&audience, RecordKind::Expense, &previous_period.span(&period))
            .await?;
        let (current_expenses, previous_expenses): (Vec<_>, Vec<_>) =
            expenses.into_iter().partition(|r| period.contains(r.date));
        let incomes = self.fetch(&audience, RecordKind::Income, &period).await?;

        let expenses_by_owner = aggregate(&current_expenses, GroupBy::Owner);
        let incomes_by_owner = aggregate(&incomes, GroupBy::Owner);

        let users: Vec<UserMonthTotals> = std::iter::once(&audience.caller)
            .chain(audience.partner.iter())
            .map(|user| {
                let key = GroupKey::Owner(user.id.clone());
                let total_expenses = expenses_by_owner.get(&key);
                let total_incomes = incomes_by_owner.get(&key);
                UserMonthTotals {
                    user: user.clone(),
                    total_expenses,
                    total_incomes,
                    balance: total_incomes - total_expenses,
                }
            })
            .collect();

        let total_expenses = expenses_by_owner.total();
        let total_incomes = incomes_by_owner.total();

        let recurring: Vec<FinancialRecord> = current_expenses
            .iter()
            .filter(|r| r.is_recurring)
            .cloned()
            .collect();

        let contributions = audience.partner.as_ref().map(|partner| {
            Self::build_contributions(&audience.caller, partner, &period, &current_expenses)
        });

        let rising = compare_months(
            &category_breakdown(&current_expenses),
            &category_breakdown(&previous_expenses),
            query.threshold_percent,
        );

        Ok(MonthlySynthesis {
            period,
            users,
            total_expenses,
            total_incomes,
            global_balance: total_incomes - total_expenses,
            recurring_count: recurring.len(),
            recurring_total: total(&recurring),
            contributions,
            rising,
            no_partner: audience.no_partner,
        })
    }

    /// Month-by-month totals over the last N months, oldest first
    pub async fn monthly_evolution(
        &self,
        query: MonthlyEvolutionQuery,
    ) -> StatsResult<MonthlyEvolution> {
        info!(
            "Computing {}-month evolution for {} ({:?})",
            query.month_count, query.caller_id, query.context
        );
        let audience = self.audience(&query.caller_id, query.context.into()).await?;
        let periods = last_n_months(query.month_count, query.anchor);

        let (Some(first), Some(last)) = (periods.first(), periods.last()) else {
            return Ok(MonthlyEvolution {
                scope: audience.scope,
                months: Vec::new(),
                no_partner: audience.no_partner,
            });
        };
        let range = first.span(last);

        let expenses = self.fetch(&audience, RecordKind::Expense, &range).await?;
        let incomes = self.fetch(&audience, RecordKind::Income, &range).await?;
        let expenses_by_month = aggregate(&expenses, GroupBy::Month);
        let incomes_by_month = aggregate(&incomes, GroupBy::Month);

        let months = periods
            .iter()
            .map(|period| {
                let key = GroupKey::Month(period.year_month());
                let total_expenses = expenses_by_month.get(&key);
                let total_incomes = incomes_by_month.get(&key);
                MonthTotals {
                    month: period.year_month(),
                    total_expenses,
                    total_incomes,
                    balance: total_incomes - total_expenses,
                }
            })
            .collect();

        Ok(MonthlyEvolution {
            scope: audience.scope,
            months,
            no_partner: audience.no_partner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::scope::{ExpenseView, ReportContext};
    use crate::domain::models::AccountType::{Commune, Conjoint, Perso};
    use crate::domain::models::CategoryKey;
    use crate::domain::money::Cents;
    use crate::domain::time_window::YearMonth;
    use crate::domain::trend::PercentChange;
    use crate::storage::test_utils::{date, expense, income, orphan, recurring, TestEnvironment};
    use crate::storage::DbConnection;

    const MARCH: YearMonth = YearMonth { year: 2024, month: 3 };

    fn service(env: &TestEnvironment) -> StatisticsService<DbConnection> {
        StatisticsService::new(Arc::new(env.connection.clone()))
    }

    /// Alice and Bob linked, with categories and a month of records
    async fn couple_environment() -> TestEnvironment {
        let env = TestEnvironment::new().await.unwrap();
        env.add_couple(("alice", "Alice"), ("bob", "Bob")).await;
        env.add_expense_category("food", "Alimentation").await;
        env.add_expense_category("home", "Logement").await;
        env.add_income_category("salary", "Salaire").await;

        env.store(&expense("a1", "alice", 40.0, "2024-03-03", Commune, "food")).await;
        env.store(&recurring(expense("a2", "alice", 60.0, "2024-03-18", Commune, "home"))).await;
        env.store(&expense("a3", "alice", 25.0, "2024-03-20", Perso, "food")).await;
        env.store(&expense("b1", "bob", 50.0, "2024-03-10", Commune, "food")).await;
        env.store(&recurring(expense("b2", "bob", 15.0, "2024-03-01", Conjoint, "home"))).await;
        env.store(&expense("a0", "alice", 100.0, "2024-02-12", Perso, "food")).await;
        env.store(&income("ia", "alice", 2000.0, "2024-03-01", Perso, "salary")).await;
        env.store(&income("ib", "bob", 1500.0, "2024-03-02", Perso, "salary")).await;
        env
    }

    #[tokio::test]
    async fn test_monthly_balance_for_couple() {
        let env = couple_environment().await;

        let balance = service(&env)
            .monthly_balance(MonthlyBalanceQuery {
                caller_id: "alice".to_string(),
                month: MARCH,
                context: ReportContext::Couple,
            })
            .await
            .unwrap();

        assert_eq!(balance.scope, Scope::Couple);
        assert_eq!(balance.total_expenses, Cents::from_euros(190.0));
        assert_eq!(balance.total_incomes, Cents::from_euros(3500.0));
        assert_eq!(balance.balance, Cents::from_euros(3310.0));
        assert_eq!(
            balance.expenses_by_account_type,
            vec![
                (Perso, Cents::from_euros(25.0)),
                (Conjoint, Cents::from_euros(15.0)),
                (Commune, Cents::from_euros(150.0)),
            ]
        );
        assert!(!balance.no_partner);
    }

    #[tokio::test]
    async fn test_monthly_balance_for_self() {
        let env = couple_environment().await;

        let balance = service(&env)
            .monthly_balance(MonthlyBalanceQuery {
                caller_id: "bob".to_string(),
                month: MARCH,
                context: ReportContext::Moi,
            })
            .await
            .unwrap();

        assert_eq!(balance.total_expenses, Cents::from_euros(65.0));
        assert_eq!(balance.total_incomes, Cents::from_euros(1500.0));
        assert!(!balance.no_partner);
    }

    #[tokio::test]
    async fn test_couple_balance_without_partner_degrades_to_self() {
        let env = TestEnvironment::new().await.unwrap();
        env.add_user("solo", "Solo", None).await;
        env.store(&expense("s1", "solo", 12.0, "2024-03-03", Perso, "food")).await;
        env.store(&income("s2", "solo", 100.0, "2024-03-04", Perso, "salary")).await;

        let balance = service(&env)
            .monthly_balance(MonthlyBalanceQuery {
                caller_id: "solo".to_string(),
                month: MARCH,
                context: ReportContext::Couple,
            })
            .await
            .unwrap();

        assert!(balance.no_partner);
        assert_eq!(balance.scope, Scope::SelfOnly);
        assert_eq!(balance.total_expenses, Cents::from_euros(12.0));
        assert_eq!(balance.balance, Cents::from_euros(88.0));
    }

    #[tokio::test]
    async fn test_unknown_caller_is_unauthorized() {
        let env = couple_environment().await;

        let result = service(&env)
            .monthly_balance(MonthlyBalanceQuery {
                caller_id: "mallory".to_string(),
                month: MARCH,
                context: ReportContext::Moi,
            })
            .await;

        assert!(matches!(result, Err(StatsError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_expense_distribution_for_partner_view() {
        let env = couple_environment().await;

        let distribution = service(&env)
            .category_distribution(CategoryDistributionQuery {
                caller_id: "alice".to_string(),
                month: MARCH,
                kind: RecordKind::Expense,
                context: ReportContext::Moi,
                view: ExpenseView::Partenaire,
            })
            .await
            .unwrap();

        assert_eq!(distribution.scope, Scope::PartnerOnly);
        assert_eq!(distribution.total, Cents::from_euros(65.0));
        let names: Vec<&str> = distribution.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alimentation", "Logement"]);
    }

    #[tokio::test]
    async fn test_income_distribution_uses_context() {
        let env = couple_environment().await;

        let distribution = service(&env)
            .category_distribution(CategoryDistributionQuery {
                caller_id: "alice".to_string(),
                month: MARCH,
                kind: RecordKind::Income,
                context: ReportContext::Couple,
                view: ExpenseView::Moi,
            })
            .await
            .unwrap();

        assert_eq!(distribution.scope, Scope::Couple);
        assert_eq!(distribution.categories.len(), 1);
        assert_eq!(distribution.categories[0].total, Cents::from_euros(3500.0));
    }

    #[tokio::test]
    async fn test_distribution_buckets_deleted_categories() {
        let env = couple_environment().await;
        env.store(&orphan(expense("o1", "alice", 9.0, "2024-03-09", Perso, "removed"))).await;

        let distribution = service(&env)
            .category_distribution(CategoryDistributionQuery {
                caller_id: "alice".to_string(),
                month: MARCH,
                kind: RecordKind::Expense,
                context: ReportContext::Moi,
                view: ExpenseView::Moi,
            })
            .await
            .unwrap();

        let unknown = distribution
            .categories
            .iter()
            .find(|c| c.key == CategoryKey::Unknown)
            .unwrap();
        assert_eq!(unknown.total, Cents::from_euros(9.0));
        assert_eq!(distribution.total, Cents::from_euros(134.0));
    }

    #[tokio::test]
    async fn test_comparison_flags_rising_category() {
        let env = couple_environment().await;

        let summary = service(&env)
            .comparison_summary(ComparisonQuery {
                caller_id: "alice".to_string(),
                month: MARCH,
                view: ExpenseView::Moi,
                threshold_percent: 10.0,
            })
            .await
            .unwrap();

        assert_eq!(summary.previous_total, Cents::from_euros(100.0));
        assert_eq!(summary.current_total, Cents::from_euros(125.0));
        // Logement is new this month; Alimentation went from 100 to 65
        assert_eq!(summary.rising.len(), 1);
        assert_eq!(summary.rising[0].name, "Logement");
        assert_eq!(summary.rising[0].percent_change, PercentChange::New);
    }

    #[tokio::test]
    async fn test_couple_contributions_scenario() {
        let env = couple_environment().await;

        let contributions = service(&env)
            .couple_contributions(CoupleMonthQuery {
                caller_id: "alice".to_string(),
                month: MARCH,
            })
            .await
            .unwrap();

        assert_eq!(contributions.split.total_commune, Cents::from_euros(150.0));
        assert_eq!(contributions.caller.total_expenses, Cents::from_euros(100.0));
        assert_eq!(contributions.partner.total_expenses, Cents::from_euros(50.0));
        assert_eq!(contributions.partner.user.name, "Bob");
        assert_eq!(contributions.split.gap_a, 25.0);
    }

    #[tokio::test]
    async fn test_couple_contributions_from_partner_side() {
        let env = couple_environment().await;

        let contributions = service(&env)
            .couple_contributions(CoupleMonthQuery {
                caller_id: "bob".to_string(),
                month: MARCH,
            })
            .await
            .unwrap();

        assert_eq!(contributions.caller.user.id, "bob");
        assert_eq!(contributions.split.gap_a, -25.0);
    }

    #[tokio::test]
    async fn test_couple_contributions_require_partner() {
        let env = TestEnvironment::new().await.unwrap();
        env.add_user("solo", "Solo", None).await;

        let result = service(&env)
            .couple_contributions(CoupleMonthQuery {
                caller_id: "solo".to_string(),
                month: MARCH,
            })
            .await;

        assert!(matches!(result, Err(StatsError::NoPartnerLinked(id)) if id == "solo"));
    }

    #[tokio::test]
    async fn test_couple_contributions_in_empty_month() {
        let env = couple_environment().await;

        let contributions = service(&env)
            .couple_contributions(CoupleMonthQuery {
                caller_id: "alice".to_string(),
                month: YearMonth { year: 2023, month: 7 },
            })
            .await
            .unwrap();

        assert_eq!(contributions.split.total_commune, Cents::ZERO);
        assert_eq!(contributions.split.gap_a, 0.0);
    }

    #[tokio::test]
    async fn test_fixed_charges_split_by_payer() {
        let env = couple_environment().await;

        let charges = service(&env)
            .fixed_charges(CoupleMonthQuery {
                caller_id: "alice".to_string(),
                month: MARCH,
            })
            .await
            .unwrap();

        assert_eq!(charges.caller_charges.len(), 1);
        assert_eq!(charges.caller_charges[0].id, "a2");
        assert_eq!(charges.partner_charges.len(), 1);
        assert_eq!(charges.partner_charges[0].id, "b2");
        assert_eq!(charges.couple_total, Cents::from_euros(75.0));
        assert!(!charges.no_partner);
    }

    #[tokio::test]
    async fn test_fixed_charges_without_partner() {
        let env = TestEnvironment::new().await.unwrap();
        env.add_user("solo", "Solo", None).await;
        env.store(&recurring(expense("rent", "solo", 12.0, "2024-03-05", Perso, "home"))).await;
        env.store(&expense("once", "solo", 30.0, "2024-03-06", Perso, "food")).await;

        let charges = service(&env)
            .fixed_charges(CoupleMonthQuery {
                caller_id: "solo".to_string(),
                month: MARCH,
            })
            .await
            .unwrap();

        assert!(charges.no_partner);
        assert_eq!(charges.caller_charges.len(), 1);
        assert_eq!(charges.caller_charges[0].id, "rent");
        assert!(charges.partner_charges.is_empty());
        assert_eq!(charges.caller_total, Cents::from_euros(12.0));
        assert_eq!(charges.partner_total, Cents::ZERO);
        assert_eq!(charges.couple_total, Cents::from_euros(12.0));
    }

    #[tokio::test]
    async fn test_extreme_amounts_fail_instead_of_overflowing() {
        let env = TestEnvironment::new().await.unwrap();
        env.add_user("alice", "Alice", None).await;
        env.store(&expense("x1", "alice", 9e16, "2024-03-03", Commune, "food")).await;
        env.store(&expense("x2", "alice", 9e16, "2024-03-04", Commune, "food")).await;

        let result = service(&env)
            .monthly_balance(MonthlyBalanceQuery {
                caller_id: "alice".to_string(),
                month: MARCH,
                context: ReportContext::Moi,
            })
            .await;

        assert!(matches!(result, Err(StatsError::Storage(_))));
    }

    #[tokio::test]
    async fn test_monthly_synthesis() {
        let env = couple_environment().await;

        let synthesis = service(&env)
            .monthly_synthesis(MonthlySynthesisQuery {
                caller_id: "alice".to_string(),
                month: MARCH,
                threshold_percent: 20.0,
            })
            .await
            .unwrap();

        assert_eq!(synthesis.users.len(), 2);
        assert_eq!(synthesis.users[0].user.id, "alice");
        assert_eq!(synthesis.users[0].total_expenses, Cents::from_euros(125.0));
        assert_eq!(synthesis.users[0].balance, Cents::from_euros(1875.0));
        assert_eq!(synthesis.users[1].total_incomes, Cents::from_euros(1500.0));
        assert_eq!(synthesis.total_expenses, Cents::from_euros(190.0));
        assert_eq!(synthesis.global_balance, Cents::from_euros(3310.0));
        assert_eq!(synthesis.recurring_count, 2);
        assert_eq!(synthesis.recurring_total, Cents::from_euros(75.0));

        let contributions = synthesis.contributions.unwrap();
        assert_eq!(contributions.split.gap_a, 25.0);

        // Alimentation: 100 -> 115, +15%; Logement is new
        let rising: Vec<&str> = synthesis.rising.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(rising, vec!["Logement"]);
    }

    #[tokio::test]
    async fn test_monthly_synthesis_without_partner() {
        let env = TestEnvironment::new().await.unwrap();
        env.add_user("solo", "Solo", None).await;
        env.store(&expense("s1", "solo", 12.0, "2024-03-03", Perso, "food")).await;

        let synthesis = service(&env)
            .monthly_synthesis(MonthlySynthesisQuery {
                caller_id: "solo".to_string(),
                month: MARCH,
                threshold_percent: 20.0,
            })
            .await
            .unwrap();

        assert!(synthesis.no_partner);
        assert_eq!(synthesis.users.len(), 1);
        assert!(synthesis.contributions.is_none());
        assert_eq!(synthesis.global_balance, Cents::from_euros(-12.0));
    }

    #[tokio::test]
    async fn test_monthly_evolution_across_year_boundary() {
        let env = TestEnvironment::new().await.unwrap();
        env.add_user("alice", "Alice", None).await;
        env.store(&expense("n", "alice", 10.0, "2023-11-30", Perso, "food")).await;
        env.store(&expense("d", "alice", 20.0, "2023-12-01", Perso, "food")).await;
        env.store(&income("j", "alice", 50.0, "2024-01-31", Perso, "salary")).await;
        env.store(&expense("old", "alice", 99.0, "2023-10-31", Perso, "food")).await;

        let evolution = service(&env)
            .monthly_evolution(MonthlyEvolutionQuery {
                caller_id: "alice".to_string(),
                month_count: 3,
                anchor: date("2024-01-15"),
                context: ReportContext::Moi,
            })
            .await
            .unwrap();

        let months: Vec<(YearMonth, Cents, Cents)> = evolution
            .months
            .iter()
            .map(|m| (m.month, m.total_expenses, m.balance))
            .collect();
        assert_eq!(
            months,
            vec![
                (YearMonth { year: 2023, month: 11 }, Cents::from_euros(10.0), Cents::from_euros(-10.0)),
                (YearMonth { year: 2023, month: 12 }, Cents::from_euros(20.0), Cents::from_euros(-20.0)),
                (YearMonth { year: 2024, month: 1 }, Cents::ZERO, Cents::from_euros(50.0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_monthly_evolution_for_zero_months() {
        let env = TestEnvironment::new().await.unwrap();
        env.add_user("alice", "Alice", None).await;

        let evolution = service(&env)
            .monthly_evolution(MonthlyEvolutionQuery {
                caller_id: "alice".to_string(),
                month_count: 0,
                anchor: date("2024-01-15"),
                context: ReportContext::Couple,
            })
            .await
            .unwrap();

        assert!(evolution.months.is_empty());
        assert!(evolution.no_partner);
    }
}
