//! # Domain Module
//!
//! Statistics core of the couple budget application.
//!
//! Everything here is computed on demand from the stored expenses and incomes;
//! no derived figure is persisted. The domain reads through the storage traits
//! and never mutates records.
//!
//! ## Module Organization
//!
//! - **time_window**: Calendar months, closed date windows and "last N months"
//! - **aggregation**: Summing records by category, month, account type or owner
//! - **contribution**: Splitting shared ("Commune") expenses between partners
//! - **trend**: Month-over-month category comparison against a threshold
//! - **partner_resolver**: Caller authentication and partner lookup
//! - **record_store**: Fetching and merging the records of one or two owners
//! - **statistics_service**: Assembles the reports exposed over REST
//!
//! ## Business Rules
//!
//! - Amounts are summed in whole cents, never in floating point
//! - Date windows are closed on both ends
//! - A record whose category was deleted is counted under "Unknown"
//! - Couple-scoped reports degrade to the caller alone when no partner is linked,
//!   except the contribution split which requires a partner

pub mod aggregation;
pub mod commands;
pub mod contribution;
pub mod errors;
pub mod models;
pub mod money;
pub mod partner_resolver;
pub mod record_store;
pub mod reports;
pub mod statistics_service;
pub mod time_window;
pub mod trend;

pub use errors::{StatsError, StatsResult, ValidationError};
pub use money::Cents;
pub use statistics_service::StatisticsService;
