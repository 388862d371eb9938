//! Shared fixtures for tests that need a populated database.

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::models::{AccountType, Category, CategoryRef, FinancialRecord, RecordKind, User};
use crate::domain::money::Cents;
use crate::storage::{Connection, DbConnection, RecordRepository, RecordStorage, UserRepository, UserStorage};

/// A fresh in-memory database with repositories attached
pub struct TestEnvironment {
    pub connection: DbConnection,
    pub records: RecordRepository,
    pub users: UserRepository,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let connection = DbConnection::init_test().await?;
        Ok(Self {
            records: connection.create_record_repository(),
            users: connection.create_user_repository(),
            connection,
        })
    }

    /// Store a user, optionally pointing at a partner
    pub async fn add_user(&self, id: &str, name: &str, partner_id: Option<&str>) {
        let user = match partner_id {
            Some(partner_id) => User::new(id, name).with_partner(partner_id),
            None => User::new(id, name),
        };
        self.users.store_user(&user).await.unwrap();
    }

    /// Store two users linked to each other
    pub async fn add_couple(&self, a: (&str, &str), b: (&str, &str)) {
        self.add_user(a.0, a.1, Some(b.0)).await;
        self.add_user(b.0, b.1, Some(a.0)).await;
    }

    pub async fn add_expense_category(&self, id: &str, name: &str) {
        self.records
            .store_category(RecordKind::Expense, &Category::new(id, name))
            .await
            .unwrap();
    }

    pub async fn add_income_category(&self, id: &str, name: &str) {
        self.records
            .store_category(RecordKind::Income, &Category::new(id, name))
            .await
            .unwrap();
    }

    pub async fn store(&self, record: &FinancialRecord) {
        self.records.store_record(record).await.unwrap();
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn record(
    kind: RecordKind,
    id: &str,
    owner: &str,
    euros: f64,
    on: &str,
    account_type: AccountType,
    category_id: &str,
) -> FinancialRecord {
    FinancialRecord {
        id: id.to_string(),
        kind,
        amount: Cents::from_euros(euros),
        date: date(on),
        owner_id: owner.to_string(),
        account_type,
        // Name is resolved by the repository on read
        category: CategoryRef::Known {
            id: category_id.to_string(),
            name: category_id.to_string(),
        },
        description: format!("{} {}", category_id, id),
        is_recurring: false,
    }
}

pub fn expense(
    id: &str,
    owner: &str,
    euros: f64,
    on: &str,
    account_type: AccountType,
    category_id: &str,
) -> FinancialRecord {
    record(RecordKind::Expense, id, owner, euros, on, account_type, category_id)
}

pub fn income(
    id: &str,
    owner: &str,
    euros: f64,
    on: &str,
    account_type: AccountType,
    category_id: &str,
) -> FinancialRecord {
    record(RecordKind::Income, id, owner, euros, on, account_type, category_id)
}

pub fn recurring(mut record: FinancialRecord) -> FinancialRecord {
    record.is_recurring = true;
    record
}

pub fn orphan(mut record: FinancialRecord) -> FinancialRecord {
    let id = record.category.key().id().to_string();
    record.category = CategoryRef::Orphan { id };
    record
}
