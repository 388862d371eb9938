//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ApiResponse;
use tracing::{error, warn};

use crate::domain::{StatsError, ValidationError};

/// A domain error on its way out of a handler
#[derive(Debug)]
pub struct ApiError(pub StatsError);

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    /// HTTP status and machine-readable code for each error kind
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            StatsError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            StatsError::NoPartnerLinked(_) => (StatusCode::CONFLICT, "no_partner_linked"),
            StatsError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            StatsError::OwnerNotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            StatsError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_failure"),
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            StatsError::Unauthorized => "Authentication required".to_string(),
            StatsError::NoPartnerLinked(_) => {
                "No partner is linked to this account; couple contributions are unavailable"
                    .to_string()
            }
            StatsError::Validation(e) => format!("Invalid parameter: {}", e),
            StatsError::OwnerNotFound(_) => "Requested user does not exist".to_string(),
            StatsError::Storage(_) => "Statistics are temporarily unavailable".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self.0 {
            StatsError::Storage(e) => error!("Storage failure while computing statistics: {:#}", e),
            other => warn!("Statistics request rejected ({}): {}", code, other),
        }

        let body: ApiResponse<()> = ApiResponse::error(code, self.message());
        (status, Json(body)).into_response()
    }
}
