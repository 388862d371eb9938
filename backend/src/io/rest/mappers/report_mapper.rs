use crate::domain::aggregation::CategoryAmount;
use crate::domain::models::{AccountType, FinancialRecord, RecordKind};
use crate::domain::money::Cents;
use crate::domain::reports::{
    CategoryDistribution, ComparisonSummary, CoupleContributions, FixedCharges, MonthlyBalance,
    MonthlyEvolution, MonthlySynthesis,
};
use crate::domain::time_window::Period;
use crate::domain::trend::{CategoryTrend as DomainCategoryTrend, PercentChange};
use shared::{
    AccountTypeTotals, CategoryDistributionResponse, CategoryTotal, CategoryTrend as SharedCategoryTrend,
    ComparisonResponse, CoupleContributionsResponse, FixedCharge, FixedChargesResponse,
    MonthTotals as SharedMonthTotals, MonthlyBalanceResponse, MonthlyEvolutionResponse,
    MonthlySynthesisResponse, PeriodInfo, RecurringSummary, UserContribution, UserTotals,
};

/// Converts domain reports (cents) into wire DTOs (euros)
pub struct ReportMapper;

impl ReportMapper {
    pub fn monthly_balance(report: MonthlyBalance) -> MonthlyBalanceResponse {
        let by_type = |t: AccountType| {
            report
                .expenses_by_account_type
                .iter()
                .find(|(account_type, _)| *account_type == t)
                .map(|(_, amount)| amount.to_euros())
                .unwrap_or(0.0)
        };

        MonthlyBalanceResponse {
            periode: Self::period(&report.period),
            context: report.scope.label().to_string(),
            total_expenses: report.total_expenses.to_euros(),
            total_incomes: report.total_incomes.to_euros(),
            solde: report.balance.to_euros(),
            expenses_by_account_type: AccountTypeTotals {
                perso: by_type(AccountType::Perso),
                conjoint: by_type(AccountType::Conjoint),
                commune: by_type(AccountType::Commune),
            },
            no_partner: report.no_partner,
        }
    }

    pub fn category_distribution(report: CategoryDistribution) -> CategoryDistributionResponse {
        CategoryDistributionResponse {
            periode: Self::period(&report.period),
            kind: Self::kind_label(report.kind).to_string(),
            scope: report.scope.label().to_string(),
            categories: report.categories.into_iter().map(Self::category_total).collect(),
            total: report.total.to_euros(),
            no_partner: report.no_partner,
        }
    }

    pub fn comparison(report: ComparisonSummary) -> ComparisonResponse {
        ComparisonResponse {
            current_period: Self::period(&report.current_period),
            previous_period: Self::period(&report.previous_period),
            scope: report.scope.label().to_string(),
            current_total: report.current_total.to_euros(),
            previous_total: report.previous_total.to_euros(),
            seuil: report.threshold_percent,
            rising_categories: report.rising.into_iter().map(Self::trend).collect(),
            no_partner: report.no_partner,
        }
    }

    pub fn couple_contributions(report: CoupleContributions) -> CoupleContributionsResponse {
        let contributions = [report.caller, report.partner]
            .into_iter()
            .map(|c| UserContribution {
                user_id: c.user.id,
                name: c.user.name,
                total_expenses: c.total_expenses.to_euros(),
            })
            .collect();

        CoupleContributionsResponse {
            periode: Self::period(&report.period),
            contributions,
            total_couple_expenses: report.split.total_commune.to_euros(),
            theoretical_share: Self::round_two_decimals(report.split.theoretical_share),
            gap: Self::round_two_decimals(report.split.gap_a),
        }
    }

    pub fn fixed_charges(report: FixedCharges) -> FixedChargesResponse {
        FixedChargesResponse {
            periode: Self::period(&report.period),
            caller_charges: report.caller_charges.into_iter().map(Self::fixed_charge).collect(),
            partner_charges: report.partner_charges.into_iter().map(Self::fixed_charge).collect(),
            caller_total: report.caller_total.to_euros(),
            partner_total: report.partner_total.to_euros(),
            couple_total: report.couple_total.to_euros(),
            no_partner: report.no_partner,
        }
    }

    pub fn monthly_synthesis(report: MonthlySynthesis) -> MonthlySynthesisResponse {
        MonthlySynthesisResponse {
            periode: Self::period(&report.period),
            users: report
                .users
                .into_iter()
                .map(|u| UserTotals {
                    user_id: u.user.id,
                    name: u.user.name,
                    total_expenses: u.total_expenses.to_euros(),
                    total_incomes: u.total_incomes.to_euros(),
                    solde: u.balance.to_euros(),
                })
                .collect(),
            total_expenses: report.total_expenses.to_euros(),
            total_incomes: report.total_incomes.to_euros(),
            global_balance: report.global_balance.to_euros(),
            recurring: RecurringSummary {
                count: report.recurring_count,
                total: report.recurring_total.to_euros(),
            },
            contributions: report.contributions.map(Self::couple_contributions),
            rising_categories: report.rising.into_iter().map(Self::trend).collect(),
            no_partner: report.no_partner,
        }
    }

    pub fn monthly_evolution(report: MonthlyEvolution) -> MonthlyEvolutionResponse {
        MonthlyEvolutionResponse {
            context: report.scope.label().to_string(),
            months: report
                .months
                .into_iter()
                .map(|m| SharedMonthTotals {
                    annee: m.month.year,
                    mois: m.month.month,
                    total_expenses: m.total_expenses.to_euros(),
                    total_incomes: m.total_incomes.to_euros(),
                    solde: m.balance.to_euros(),
                })
                .collect(),
            no_partner: report.no_partner,
        }
    }

    fn period(period: &Period) -> PeriodInfo {
        let month = period.year_month();
        PeriodInfo {
            annee: month.year,
            mois: month.month,
            start: period.start,
            end: period.end,
        }
    }

    fn kind_label(kind: RecordKind) -> &'static str {
        match kind {
            RecordKind::Expense => "depenses",
            RecordKind::Income => "revenus",
        }
    }

    fn category_total(amount: CategoryAmount) -> CategoryTotal {
        CategoryTotal {
            id: amount.key.id().to_string(),
            name: amount.name,
            total: amount.total.to_euros(),
        }
    }

    fn trend(trend: DomainCategoryTrend) -> SharedCategoryTrend {
        SharedCategoryTrend {
            category_id: trend.key.id().to_string(),
            name: trend.name,
            current_total: trend.current_total.to_euros(),
            previous_total: trend.previous_total.to_euros(),
            percent_change: trend.percent_change.as_finite().map(Self::round_two_decimals),
            is_new: trend.percent_change == PercentChange::New,
            absolute_change: trend.absolute_change.to_euros(),
        }
    }

    fn fixed_charge(record: FinancialRecord) -> FixedCharge {
        FixedCharge {
            category_id: record.category.key().id().to_string(),
            category_name: record.category.name().to_string(),
            id: record.id,
            description: record.description,
            amount: record.amount.to_euros(),
            date: record.date,
            account_type: record.account_type.as_str().to_string(),
        }
    }

    /// Two-decimal rounding for derived fractional values
    fn round_two_decimals(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }
}
