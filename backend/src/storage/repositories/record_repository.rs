use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{AccountType, Category, CategoryRef, FinancialRecord, RecordKind};
use crate::domain::money::Cents;
use crate::domain::time_window::Period;
use crate::storage::connection::DbConnection;
use crate::storage::traits::RecordStorage;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository for expense and income records and their categories
#[derive(Clone)]
pub struct RecordRepository {
    db: DbConnection,
}

impl RecordRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Record table and category table backing a kind
    fn tables(kind: RecordKind) -> (&'static str, &'static str) {
        match kind {
            RecordKind::Expense => ("expenses", "expense_categories"),
            RecordKind::Income => ("incomes", "income_categories"),
        }
    }

    fn map_row(kind: RecordKind, row: &SqliteRow) -> Result<FinancialRecord> {
        let id: String = row.get("id");

        let raw_date: String = row.get("date");
        let date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
            .with_context(|| format!("record {} has malformed date '{}'", id, raw_date))?;

        let raw_account_type: String = row.get("account_type");
        let account_type = AccountType::parse(&raw_account_type).ok_or_else(|| {
            anyhow!("record {} has unknown account type '{}'", id, raw_account_type)
        })?;

        let raw_amount: f64 = row.get("amount");
        let amount = Cents::try_from_euros(raw_amount).ok_or_else(|| {
            anyhow!("record {} has out-of-range amount {}", id, raw_amount)
        })?;

        let category_id: String = row.get("category_id");
        let category = match row.get::<Option<String>, _>("category_name") {
            Some(name) => CategoryRef::Known { id: category_id, name },
            None => CategoryRef::Orphan { id: category_id },
        };

        Ok(FinancialRecord {
            amount,
            owner_id: row.get("owner_id"),
            description: row.get("description"),
            is_recurring: row.get("is_recurring"),
            id,
            kind,
            date,
            account_type,
            category,
        })
    }
}

#[async_trait]
impl RecordStorage for RecordRepository {
    async fn list_records(
        &self,
        owner_id: &str,
        kind: RecordKind,
        date_range: Option<&Period>,
        account_type: Option<AccountType>,
    ) -> Result<Vec<FinancialRecord>> {
        let (records_table, categories_table) = Self::tables(kind);
        // The category join happens here so the domain receives resolved records;
        // a dangling category_id comes back with a NULL name
        let sql = format!(
            r#"
            SELECT r.id, r.owner_id, r.amount, r.date, r.account_type, r.category_id,
                   r.description, r.is_recurring, c.name AS category_name
            FROM {records_table} r
            LEFT JOIN {categories_table} c ON c.id = r.category_id
            WHERE r.owner_id = ?
              AND (? IS NULL OR r.date >= ?)
              AND (? IS NULL OR r.date <= ?)
              AND (? IS NULL OR r.account_type = ?)
            ORDER BY r.date ASC, r.id ASC
            "#
        );

        let start = date_range.map(|p| p.start.format(DATE_FORMAT).to_string());
        let end = date_range.map(|p| p.end.format(DATE_FORMAT).to_string());
        let account_type = account_type.map(|a| a.as_str());

        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .bind(start.clone())
            .bind(start)
            .bind(end.clone())
            .bind(end)
            .bind(account_type)
            .bind(account_type)
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(|row| Self::map_row(kind, row)).collect()
    }

    async fn store_record(&self, record: &FinancialRecord) -> Result<()> {
        if !record.account_type.is_valid_for(record.kind) {
            bail!(
                "account type {} is not allowed for {:?} records",
                record.account_type,
                record.kind
            );
        }

        let (records_table, _) = Self::tables(record.kind);
        let category_id = match &record.category {
            CategoryRef::Known { id, .. } | CategoryRef::Orphan { id } => id,
        };

        sqlx::query(&format!(
            r#"
            INSERT INTO {records_table}
                (id, owner_id, amount, date, account_type, category_id, description, is_recurring)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#
        ))
        .bind(&record.id)
        .bind(&record.owner_id)
        .bind(record.amount.to_euros())
        .bind(record.date.format(DATE_FORMAT).to_string())
        .bind(record.account_type.as_str())
        .bind(category_id)
        .bind(&record.description)
        .bind(record.is_recurring)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn store_category(&self, kind: RecordKind, category: &Category) -> Result<()> {
        let (_, categories_table) = Self::tables(kind);
        sqlx::query(&format!(
            "INSERT INTO {categories_table} (id, name, description) VALUES (?, ?, ?)"
        ))
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_category(&self, kind: RecordKind, category_id: &str) -> Result<bool> {
        let (_, categories_table) = Self::tables(kind);
        let result = sqlx::query(&format!("DELETE FROM {categories_table} WHERE id = ?"))
            .bind(category_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
