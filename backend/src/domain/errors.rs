//! Error kinds surfaced by the statistics core.
//!
//! Anomalies with a safe fallback (orphan category, missing partner on a
//! degradable report) never show up here; they are absorbed and logged.

use thiserror::Error;

pub type StatsResult<T> = std::result::Result<T, StatsError>;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("caller identity could not be established")]
    Unauthorized,

    #[error("user {0} has no linked partner")]
    NoPartnerLinked(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("user {0} not found")]
    OwnerNotFound(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Malformed request parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("year must be a number between 1 and 9999, got '{0}'")]
    InvalidYear(String),

    #[error("month must be a number between 1 and 12, got '{0}'")]
    InvalidMonth(String),

    #[error("month count must be a non-negative number, got '{0}'")]
    InvalidMonthCount(String),

    #[error("month count {requested} exceeds the maximum of {max}")]
    MonthCountTooLarge { requested: i64, max: u32 },

    #[error("unknown context '{0}', expected 'moi' or 'couple'")]
    InvalidContext(String),

    #[error("unknown view '{0}', expected 'moi', 'partenaire' or 'couple_complet'")]
    InvalidView(String),

    #[error("unknown record type '{0}', expected 'depenses' or 'revenus'")]
    InvalidRecordKind(String),

    #[error("threshold must be a non-negative percentage, got '{0}'")]
    InvalidThreshold(String),
}
