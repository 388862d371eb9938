//! # Storage Traits
//!
//! Storage abstractions the statistics domain reads through. The domain only
//! calls the read methods; writes exist for the CRUD/import layer and tests.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{AccountType, Category, FinancialRecord, RecordKind, User};
use crate::domain::time_window::Period;

/// Trait defining the interface for expense/income storage operations
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// List one owner's records of a kind, joined with their category.
    /// Returns records ordered by date ascending, then id.
    async fn list_records(
        &self,
        owner_id: &str,
        kind: RecordKind,
        date_range: Option<&Period>,
        account_type: Option<AccountType>,
    ) -> Result<Vec<FinancialRecord>>;

    /// Store a new record
    async fn store_record(&self, record: &FinancialRecord) -> Result<()>;

    /// Store a new category in the namespace of `kind`
    async fn store_category(&self, kind: RecordKind, category: &Category) -> Result<()>;

    /// Delete a category; returns true if it existed
    async fn delete_category(&self, kind: RecordKind, category_id: &str) -> Result<bool>;
}

/// Trait defining the interface for user storage operations
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Retrieve a specific user by ID
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Store a new user
    async fn store_user(&self, user: &User) -> Result<()>;

    /// Set or clear the partner reference on one user's row only
    async fn set_partner(&self, user_id: &str, partner_id: Option<&str>) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// Provides factory methods for the repositories so domain services stay
/// independent of the concrete backend.
pub trait Connection: Send + Sync + Clone {
    type RecordRepository: RecordStorage + Clone;
    type UserRepository: UserStorage + Clone;

    fn create_record_repository(&self) -> Self::RecordRepository;

    fn create_user_repository(&self) -> Self::UserRepository;
}
