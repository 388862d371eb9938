//! Caller identity as established by the upstream authentication layer.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::domain::StatsError;
use crate::io::rest::error::ApiError;

pub const CALLER_HEADER: &str = "x-user-id";

/// Id of the authenticated user making the request.
///
/// Only presence is checked here; the statistics service rejects ids that do
/// not belong to a known user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| CallerId(id.to_string()))
            .ok_or(ApiError(StatsError::Unauthorized))
    }
}
