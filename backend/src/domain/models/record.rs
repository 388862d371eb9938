use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::money::Cents;

pub const UNKNOWN_CATEGORY_ID: &str = "unknown";
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Which collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Expense,
    Income,
}

/// Account type tag of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Perso,
    Conjoint,
    /// Shared expense, only valid for expenses
    Commune,
}

impl AccountType {
    pub const ALL: [AccountType; 3] = [AccountType::Perso, AccountType::Conjoint, AccountType::Commune];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Perso => "Perso",
            AccountType::Conjoint => "Conjoint",
            AccountType::Commune => "Commune",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Perso" => Some(AccountType::Perso),
            "Conjoint" => Some(AccountType::Conjoint),
            "Commune" => Some(AccountType::Commune),
            _ => None,
        }
    }

    /// Incomes are never shared
    pub fn is_valid_for(&self, kind: RecordKind) -> bool {
        !(kind == RecordKind::Income && *self == AccountType::Commune)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping identity of a category; deleted categories collapse into `Unknown`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryKey {
    Known(String),
    Unknown,
}

impl CategoryKey {
    pub fn id(&self) -> &str {
        match self {
            CategoryKey::Known(id) => id,
            CategoryKey::Unknown => UNKNOWN_CATEGORY_ID,
        }
    }
}

/// Category reference resolved at read time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Known { id: String, name: String },
    /// The referenced category no longer exists
    Orphan { id: String },
}

impl CategoryRef {
    pub fn key(&self) -> CategoryKey {
        match self {
            CategoryRef::Known { id, .. } => CategoryKey::Known(id.clone()),
            CategoryRef::Orphan { .. } => CategoryKey::Unknown,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CategoryRef::Known { name, .. } => name,
            CategoryRef::Orphan { .. } => UNKNOWN_CATEGORY_NAME,
        }
    }

    pub fn is_orphan(&self) -> bool {
        matches!(self, CategoryRef::Orphan { .. })
    }
}

/// A category definition as written by the CRUD layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }
}

/// An expense or income with its category already joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialRecord {
    pub id: String,
    pub kind: RecordKind,
    pub amount: Cents,
    pub date: NaiveDate,
    pub owner_id: String,
    pub account_type: AccountType,
    pub category: CategoryRef,
    pub description: String,
    pub is_recurring: bool,
}
