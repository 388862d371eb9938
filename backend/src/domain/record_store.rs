//! Record store accessor: fetches and merges records for one or two owners.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use anyhow::anyhow;
use tracing::{debug, warn};

use crate::domain::errors::{StatsError, StatsResult};
use crate::domain::models::{AccountType, CategoryRef, FinancialRecord, RecordKind};
use crate::domain::money::Cents;
use crate::domain::time_window::Period;
use crate::storage::{Connection, RecordStorage, UserStorage};

#[derive(Clone)]
pub struct RecordStore<C: Connection> {
    record_repository: C::RecordRepository,
    user_repository: C::UserRepository,
}

impl<C: Connection> RecordStore<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            record_repository: connection.create_record_repository(),
            user_repository: connection.create_user_repository(),
        }
    }

    /// Fetch the records of every owner in `owner_ids`, merged and deduplicated
    /// by record id, ordered by date then id.
    ///
    /// Fails with `OwnerNotFound` if an owner does not exist. Owners without
    /// matching records simply contribute nothing. A set whose combined
    /// magnitude exceeds [`Cents::MAX_TOTAL`] is a storage failure.
    pub async fn fetch_records(
        &self,
        owner_ids: &[String],
        kind: RecordKind,
        date_range: Option<&Period>,
        account_type: Option<AccountType>,
    ) -> StatsResult<Vec<FinancialRecord>> {
        let owners: BTreeSet<&str> = owner_ids.iter().map(String::as_str).collect();

        let mut merged: BTreeMap<String, FinancialRecord> = BTreeMap::new();
        for owner_id in owners {
            if self.user_repository.get_user(owner_id).await?.is_none() {
                return Err(StatsError::OwnerNotFound(owner_id.to_string()));
            }

            let records = self
                .record_repository
                .list_records(owner_id, kind, date_range, account_type)
                .await?;
            debug!("Fetched {} {:?} records for {}", records.len(), kind, owner_id);

            for record in records {
                merged.entry(record.id.clone()).or_insert(record);
            }
        }

        let mut records: Vec<FinancialRecord> = merged.into_values().collect();
        ensure_summable(&records)?;
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        for record in &records {
            if let CategoryRef::Orphan { id } = &record.category {
                warn!(
                    "Record {} references deleted category {}; counted as Unknown",
                    record.id, id
                );
            }
        }

        Ok(records)
    }
}

/// Every total derived from `records` must stay within `i64`
fn ensure_summable(records: &[FinancialRecord]) -> StatsResult<()> {
    let magnitude = records
        .iter()
        .try_fold(Cents::ZERO, |acc, r| acc.checked_add(r.amount.abs()));

    match magnitude {
        Some(total) if total <= Cents::MAX_TOTAL => Ok(()),
        _ => Err(StatsError::Storage(anyhow!(
            "combined amount of {} records exceeds the supported range",
            records.len()
        ))),
    }
}
