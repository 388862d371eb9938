//! # REST API for Statistics
//!
//! Read-only report endpoints under `/api/statistiques`. Every handler parses
//! its raw query values through the domain parsers, so a malformed parameter
//! comes back as a `validation_error` envelope rather than an axum rejection.

use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use shared::{
    ApiResponse, CategoryDistributionResponse, ComparisonResponse, CoupleContributionsResponse,
    FixedChargesResponse, MonthlyBalanceResponse, MonthlyEvolutionResponse,
    MonthlySynthesisResponse,
};
use tracing::info;

use crate::domain::commands::params::{
    parse_month_count, parse_record_kind, parse_threshold, parse_year_month,
};
use crate::domain::commands::reports::{
    CategoryDistributionQuery, ComparisonQuery, CoupleMonthQuery, MonthlyBalanceQuery,
    MonthlyEvolutionQuery, MonthlySynthesisQuery,
};
use crate::domain::commands::scope::{ExpenseView, ReportContext};
use crate::domain::time_window::YearMonth;
use crate::domain::ValidationError;
use crate::io::rest::error::ApiError;
use crate::io::rest::identity::CallerId;
use crate::io::rest::mappers::ReportMapper;
use crate::AppState;

/// Months covered by `/evolution` when `nbMois` is absent
pub const DEFAULT_MONTH_COUNT: u32 = 6;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Raw query parameters shared by all statistics routes
#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    pub annee: Option<String>,
    pub mois: Option<String>,
    #[serde(rename = "nbMois")]
    pub nb_mois: Option<String>,
    pub context: Option<String>,
    pub view: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub seuil: Option<String>,
}

impl StatisticsQuery {
    fn month(&self, today: NaiveDate) -> Result<YearMonth, ValidationError> {
        parse_year_month(self.annee.as_deref(), self.mois.as_deref(), today)
    }

    fn context(&self) -> Result<ReportContext, ValidationError> {
        match self.context.as_deref() {
            Some(raw) if !raw.trim().is_empty() => ReportContext::parse(raw),
            _ => Ok(ReportContext::Moi),
        }
    }

    fn view(&self) -> Result<ExpenseView, ValidationError> {
        match self.view.as_deref() {
            Some(raw) if !raw.trim().is_empty() => ExpenseView::parse(raw),
            _ => Ok(ExpenseView::Moi),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monthly expense/income totals and balance
pub async fn get_monthly_balance(
    State(state): State<AppState>,
    CallerId(caller_id): CallerId,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<MonthlyBalanceResponse> {
    info!("GET /api/statistiques/solde-mensuel - caller: {}, query: {:?}", caller_id, query);

    let request = MonthlyBalanceQuery {
        caller_id,
        month: query.month(today())?,
        context: query.context()?,
    };
    let report = state.statistics_service.monthly_balance(request).await?;

    Ok(Json(ApiResponse::success(
        "Monthly balance computed",
        ReportMapper::monthly_balance(report),
    )))
}

/// Category distribution of expenses or incomes
pub async fn get_category_distribution(
    State(state): State<AppState>,
    CallerId(caller_id): CallerId,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<CategoryDistributionResponse> {
    info!(
        "GET /api/statistiques/repartition-categories - caller: {}, query: {:?}",
        caller_id, query
    );

    let request = CategoryDistributionQuery {
        caller_id,
        month: query.month(today())?,
        kind: parse_record_kind(query.kind.as_deref())?,
        context: query.context()?,
        view: query.view()?,
    };
    let report = state.statistics_service.category_distribution(request).await?;

    Ok(Json(ApiResponse::success(
        "Category distribution computed",
        ReportMapper::category_distribution(report),
    )))
}

/// Expense categories rising versus the previous month
pub async fn get_comparison(
    State(state): State<AppState>,
    CallerId(caller_id): CallerId,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<ComparisonResponse> {
    info!("GET /api/statistiques/comparaison - caller: {}, query: {:?}", caller_id, query);

    let request = ComparisonQuery {
        caller_id,
        month: query.month(today())?,
        view: query.view()?,
        threshold_percent: parse_threshold(query.seuil.as_deref(), state.rising_threshold_percent)?,
    };
    let report = state.statistics_service.comparison_summary(request).await?;

    Ok(Json(ApiResponse::success(
        "Comparison computed",
        ReportMapper::comparison(report),
    )))
}

/// Split of the month's shared expenses between the partners
pub async fn get_couple_contributions(
    State(state): State<AppState>,
    CallerId(caller_id): CallerId,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<CoupleContributionsResponse> {
    info!(
        "GET /api/statistiques/contributions-couple - caller: {}, query: {:?}",
        caller_id, query
    );

    let request = CoupleMonthQuery {
        caller_id,
        month: query.month(today())?,
    };
    let report = state.statistics_service.couple_contributions(request).await?;

    Ok(Json(ApiResponse::success(
        "Couple contributions computed",
        ReportMapper::couple_contributions(report),
    )))
}

/// Recurring expenses of the month split by payer
pub async fn get_fixed_charges(
    State(state): State<AppState>,
    CallerId(caller_id): CallerId,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<FixedChargesResponse> {
    info!("GET /api/statistiques/charges-fixes - caller: {}, query: {:?}", caller_id, query);

    let request = CoupleMonthQuery {
        caller_id,
        month: query.month(today())?,
    };
    let report = state.statistics_service.fixed_charges(request).await?;

    Ok(Json(ApiResponse::success(
        "Fixed charges listed",
        ReportMapper::fixed_charges(report),
    )))
}

/// Combined monthly report
pub async fn get_monthly_synthesis(
    State(state): State<AppState>,
    CallerId(caller_id): CallerId,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<MonthlySynthesisResponse> {
    info!(
        "GET /api/statistiques/synthese-mensuelle - caller: {}, query: {:?}",
        caller_id, query
    );

    let request = MonthlySynthesisQuery {
        caller_id,
        month: query.month(today())?,
        threshold_percent: parse_threshold(query.seuil.as_deref(), state.rising_threshold_percent)?,
    };
    let report = state.statistics_service.monthly_synthesis(request).await?;

    Ok(Json(ApiResponse::success(
        "Monthly synthesis computed",
        ReportMapper::monthly_synthesis(report),
    )))
}

/// Per-month totals over the last `nbMois` months
pub async fn get_monthly_evolution(
    State(state): State<AppState>,
    CallerId(caller_id): CallerId,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<MonthlyEvolutionResponse> {
    info!("GET /api/statistiques/evolution - caller: {}, query: {:?}", caller_id, query);

    let request = MonthlyEvolutionQuery {
        caller_id,
        month_count: parse_month_count(
            query.nb_mois.as_deref(),
            DEFAULT_MONTH_COUNT,
            state.max_month_count,
        )?,
        anchor: today(),
        context: query.context()?,
    };
    let report = state.statistics_service.monthly_evolution(request).await?;

    Ok(Json(ApiResponse::success(
        "Monthly evolution computed",
        ReportMapper::monthly_evolution(report),
    )))
}
