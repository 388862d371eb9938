//! # Couple Budget Statistics Backend
//!
//! Read-only statistics over a couple's expenses and incomes.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (aggregation, splitting, trends, report assembly)
//!     ↓
//! Storage Layer (SQLite via sqlx)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::StatisticsService;
use crate::io::rest::identity::CALLER_HEADER;
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub statistics_service: StatisticsService<DbConnection>,
    /// Rise threshold used when a request carries no `seuil`
    pub rising_threshold_percent: f64,
    pub max_month_count: u32,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    info!("Setting up domain model");
    let statistics_service = StatisticsService::new(Arc::new(db_conn));

    Ok(AppState {
        statistics_service,
        rising_threshold_percent: config.rising_threshold_percent,
        max_month_count: config.max_month_count,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(CALLER_HEADER)]);
    match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => tracing::warn!("Ignoring invalid CORS origin '{}'", cors_origin),
    }

    let statistics_routes = Router::new()
        .route("/solde-mensuel", get(io::get_monthly_balance))
        .route("/repartition-categories", get(io::get_category_distribution))
        .route("/comparaison", get(io::get_comparison))
        .route("/contributions-couple", get(io::get_couple_contributions))
        .route("/charges-fixes", get(io::get_fixed_charges))
        .route("/synthese-mensuelle", get(io::get_monthly_synthesis))
        .route("/evolution", get(io::get_monthly_evolution));

    Router::new()
        .nest("/api/statistiques", statistics_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
