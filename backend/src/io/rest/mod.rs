//! # REST API Interface Layer
//!
//! HTTP endpoints for the statistics reports.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: One GET route per report
//! - **Error Handling**: Converting domain errors to status codes and error envelopes
//! - **Serialization**: Mapping cent-based reports onto the euro wire DTOs
//!
//! ## Design Principles
//!
//! - **Domain Separation**: Pure translation layer without business logic
//! - **Consistent Error Format**: Every response uses the status/message/data envelope

pub mod error;
pub mod identity;
pub mod mappers;
pub mod statistics_apis;

pub use error::ApiError;
pub use identity::CallerId;
pub use statistics_apis::*;
