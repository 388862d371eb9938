//! # IO Module
//!
//! Adapter layer between HTTP clients and the statistics domain.
//!
//! Handlers receive raw query strings and the caller identity, hand them to the
//! domain parsers and services, and format the resulting reports as the shared
//! wire DTOs inside the response envelope.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: Read-only statistics routes under `/api/statistiques`
//! - **Caller Identity**: Extracting the authenticated user from `X-User-Id`
//! - **Error Translation**: Mapping domain errors to HTTP status codes and error codes
//! - **Money Formatting**: Converting cent totals to euros at the wire boundary

pub mod rest;

pub use rest::*;
