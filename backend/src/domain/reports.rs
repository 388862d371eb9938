//! Report shapes produced by the statistics service.
//!
//! These stay in cents; the REST mappers convert them to the wire DTOs.

use crate::domain::aggregation::CategoryAmount;
use crate::domain::commands::scope::Scope;
use crate::domain::contribution::ContributionSplit;
use crate::domain::models::{AccountType, FinancialRecord, RecordKind, User};
use crate::domain::money::Cents;
use crate::domain::time_window::{Period, YearMonth};
use crate::domain::trend::CategoryTrend;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBalance {
    pub period: Period,
    pub scope: Scope,
    pub total_expenses: Cents,
    pub total_incomes: Cents,
    /// Incomes minus expenses
    pub balance: Cents,
    pub expenses_by_account_type: Vec<(AccountType, Cents)>,
    pub no_partner: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDistribution {
    pub period: Period,
    pub kind: RecordKind,
    pub scope: Scope,
    pub categories: Vec<CategoryAmount>,
    pub total: Cents,
    pub no_partner: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSummary {
    pub current_period: Period,
    pub previous_period: Period,
    pub scope: Scope,
    pub current_total: Cents,
    pub previous_total: Cents,
    pub threshold_percent: f64,
    pub rising: Vec<CategoryTrend>,
    pub no_partner: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerContribution {
    pub user: User,
    pub total_expenses: Cents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoupleContributions {
    pub period: Period,
    pub caller: PartnerContribution,
    pub partner: PartnerContribution,
    /// Split with the caller as partner A
    pub split: ContributionSplit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixedCharges {
    pub period: Period,
    pub caller_charges: Vec<FinancialRecord>,
    pub partner_charges: Vec<FinancialRecord>,
    pub caller_total: Cents,
    pub partner_total: Cents,
    pub couple_total: Cents,
    pub no_partner: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserMonthTotals {
    pub user: User,
    pub total_expenses: Cents,
    pub total_incomes: Cents,
    pub balance: Cents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySynthesis {
    pub period: Period,
    pub users: Vec<UserMonthTotals>,
    pub total_expenses: Cents,
    pub total_incomes: Cents,
    pub global_balance: Cents,
    pub recurring_count: usize,
    pub recurring_total: Cents,
    pub contributions: Option<CoupleContributions>,
    pub rising: Vec<CategoryTrend>,
    pub no_partner: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotals {
    pub month: YearMonth,
    pub total_expenses: Cents,
    pub total_incomes: Cents,
    pub balance: Cents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyEvolution {
    pub scope: Scope,
    pub months: Vec<MonthTotals>,
    pub no_partner: bool,
}
