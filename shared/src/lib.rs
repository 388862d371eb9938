//! Wire contract shared between the statistics backend and its consumers.
//!
//! Field names that existing consumers depend on (`totalDepenses`, `totalRevenus`,
//! `solde`, `contributionsUtilisateurs`, `totalDepensesCouple`,
//! `chargesUtilisateurPrincipal`, `chargesPartenaire`, `totalChargesCouple`) are
//! fixed through `serde(rename)` and must not change.
//!
//! Monetary values travel as euros (`f64`, two decimals).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome marker carried by every response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Status/message/data envelope wrapped around every payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    /// Machine-readable error kind, only present on errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            code: None,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            code: Some(code.into()),
            message: message.into(),
            data: None,
        }
    }
}

/// Closed date interval a report was computed over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodInfo {
    pub annee: i32,
    pub mois: u32,
    #[serde(rename = "dateDebut")]
    pub start: NaiveDate,
    #[serde(rename = "dateFin")]
    pub end: NaiveDate,
}

/// Expense totals per account type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountTypeTotals {
    #[serde(rename = "Perso")]
    pub perso: f64,
    #[serde(rename = "Conjoint")]
    pub conjoint: f64,
    #[serde(rename = "Commune")]
    pub commune: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBalanceResponse {
    pub periode: PeriodInfo,
    /// Scope the totals were computed for ("moi" or "couple")
    pub context: String,
    #[serde(rename = "totalDepenses")]
    pub total_expenses: f64,
    #[serde(rename = "totalRevenus")]
    pub total_incomes: f64,
    pub solde: f64,
    #[serde(rename = "repartitionParType")]
    pub expenses_by_account_type: AccountTypeTotals,
    #[serde(rename = "noPartner")]
    pub no_partner: bool,
}

/// One slice of a category pie chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub id: String,
    pub name: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDistributionResponse {
    pub periode: PeriodInfo,
    /// "depenses" or "revenus"
    #[serde(rename = "type")]
    pub kind: String,
    /// "moi", "partenaire" or "couple"
    pub scope: String,
    pub categories: Vec<CategoryTotal>,
    pub total: f64,
    #[serde(rename = "noPartner")]
    pub no_partner: bool,
}

/// A category whose spending rose between two periods.
///
/// `percentChange` is `null` and `isNew` is `true` when the category had no
/// spending in the previous period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTrend {
    pub category_id: String,
    pub name: String,
    pub current_total: f64,
    pub previous_total: f64,
    pub percent_change: Option<f64>,
    pub is_new: bool,
    pub absolute_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResponse {
    #[serde(rename = "periodeCourante")]
    pub current_period: PeriodInfo,
    #[serde(rename = "periodePrecedente")]
    pub previous_period: PeriodInfo,
    pub scope: String,
    #[serde(rename = "totalCourant")]
    pub current_total: f64,
    #[serde(rename = "totalPrecedent")]
    pub previous_total: f64,
    /// Minimum rise (percent) a category needed to be listed
    pub seuil: f64,
    #[serde(rename = "categoriesEnHausse")]
    pub rising_categories: Vec<CategoryTrend>,
    #[serde(rename = "noPartner")]
    pub no_partner: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContribution {
    pub user_id: String,
    pub name: String,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoupleContributionsResponse {
    pub periode: PeriodInfo,
    #[serde(rename = "contributionsUtilisateurs")]
    pub contributions: Vec<UserContribution>,
    #[serde(rename = "totalDepensesCouple")]
    pub total_couple_expenses: f64,
    /// Equal share each partner would have paid
    #[serde(rename = "partTheorique")]
    pub theoretical_share: f64,
    /// Caller's contribution minus the equal share; negative means the caller owes
    #[serde(rename = "ecart")]
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedCharge {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub account_type: String,
    pub category_id: String,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedChargesResponse {
    pub periode: PeriodInfo,
    #[serde(rename = "chargesUtilisateurPrincipal")]
    pub caller_charges: Vec<FixedCharge>,
    #[serde(rename = "chargesPartenaire")]
    pub partner_charges: Vec<FixedCharge>,
    #[serde(rename = "totalChargesUtilisateur")]
    pub caller_total: f64,
    #[serde(rename = "totalChargesPartenaire")]
    pub partner_total: f64,
    #[serde(rename = "totalChargesCouple")]
    pub couple_total: f64,
    #[serde(rename = "noPartner")]
    pub no_partner: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTotals {
    pub user_id: String,
    pub name: String,
    #[serde(rename = "totalDepenses")]
    pub total_expenses: f64,
    #[serde(rename = "totalRevenus")]
    pub total_incomes: f64,
    pub solde: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringSummary {
    #[serde(rename = "nombre")]
    pub count: usize,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySynthesisResponse {
    pub periode: PeriodInfo,
    #[serde(rename = "utilisateurs")]
    pub users: Vec<UserTotals>,
    #[serde(rename = "totalDepenses")]
    pub total_expenses: f64,
    #[serde(rename = "totalRevenus")]
    pub total_incomes: f64,
    #[serde(rename = "soldeGlobal")]
    pub global_balance: f64,
    #[serde(rename = "depensesRecurrentes")]
    pub recurring: RecurringSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions: Option<CoupleContributionsResponse>,
    #[serde(rename = "categoriesEnHausse")]
    pub rising_categories: Vec<CategoryTrend>,
    #[serde(rename = "noPartner")]
    pub no_partner: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotals {
    pub annee: i32,
    pub mois: u32,
    #[serde(rename = "totalDepenses")]
    pub total_expenses: f64,
    #[serde(rename = "totalRevenus")]
    pub total_incomes: f64,
    pub solde: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEvolutionResponse {
    pub context: String,
    #[serde(rename = "mois")]
    pub months: Vec<MonthTotals>,
    #[serde(rename = "noPartner")]
    pub no_partner: bool,
}
