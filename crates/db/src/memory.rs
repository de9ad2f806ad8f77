//! In-process record store.
//!
//! Holds every record in a map behind a single mutex, which makes each
//! transaction trivially atomic. Used by tests and by local runs without a
//! database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::store::{
    ConditionCheck, ConditionalPut, RecordKey, RecordStore, StoredRecord, TransactOutcome,
};

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<RecordKey, StoredRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records of both kinds.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn transact(&self, puts: Vec<ConditionalPut>) -> Result<TransactOutcome, StoreError> {
        let mut records = self.records.lock().await;

        let checks: Vec<ConditionCheck> = puts
            .iter()
            .map(|put| ConditionCheck::from_bool(put.condition.holds(records.get(&put.key))))
            .collect();

        if checks.iter().any(|c| c.failed()) {
            tracing::debug!(?checks, "Conditional transaction rejected");
            return Ok(TransactOutcome::Rejected(checks));
        }

        for put in puts {
            records.insert(put.key, put.record);
        }
        Ok(TransactOutcome::Committed)
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self.records.lock().await.get(key).cloned())
    }
}
