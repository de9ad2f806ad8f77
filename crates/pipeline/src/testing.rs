//! Test doubles shared by the pipeline unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use roster_cloud::InMemoryBlobStore;
use roster_core::config::ImportConfig;
use roster_core::employee::Employee;
use roster_db::{
    ConditionCheck, ConditionalPut, InMemoryRecordStore, RecordKey, RecordStore, StoreError,
    StoredRecord, TransactOutcome,
};

use crate::context::ImportContext;

pub fn employee(emp_no: &str, ph_no: Option<&str>, when: &str) -> Employee {
    Employee {
        emp_no: emp_no.into(),
        first_name: Some("Ada".into()),
        last_name: Some("Byron".into()),
        ph_no: ph_no.map(Into::into),
        when_modified: when.parse().unwrap(),
        pk: emp_no.into(),
    }
}

/// Store that is never reachable.
pub struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn transact(&self, _puts: Vec<ConditionalPut>) -> Result<TransactOutcome, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _key: &RecordKey) -> Result<Option<StoredRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// Store that answers every transaction with the same rejection.
pub struct ScriptedStore {
    checks: Vec<ConditionCheck>,
}

impl ScriptedStore {
    pub fn rejecting(checks: Vec<ConditionCheck>) -> Self {
        Self { checks }
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn transact(&self, _puts: Vec<ConditionalPut>) -> Result<TransactOutcome, StoreError> {
        Ok(TransactOutcome::Rejected(self.checks.clone()))
    }

    async fn get(&self, _key: &RecordKey) -> Result<Option<StoredRecord>, StoreError> {
        Ok(None)
    }
}

/// Store that commits everything and counts transactions, optionally
/// failing once `fail_after` transactions have been attempted.
#[derive(Default)]
pub struct CountingStore {
    calls: AtomicUsize,
    fail_after: Option<usize>,
}

impl CountingStore {
    pub fn failing_after(fail_after: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_after: Some(fail_after),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn transact(&self, _puts: Vec<ConditionalPut>) -> Result<TransactOutcome, StoreError> {
        let previous = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_after {
            Some(limit) if previous >= limit => Err(StoreError::Unavailable("timed out".into())),
            _ => Ok(TransactOutcome::Committed),
        }
    }

    async fn get(&self, _key: &RecordKey) -> Result<Option<StoredRecord>, StoreError> {
        Ok(None)
    }
}

/// Context over in-memory stores with the given submission limit.
pub fn context(max_per_request: usize) -> (ImportContext, Arc<InMemoryBlobStore>) {
    let blobs = Arc::new(InMemoryBlobStore::new());
    let config = ImportConfig {
        max_per_request,
        ..Default::default()
    };
    let ctx = ImportContext::new(Arc::new(InMemoryRecordStore::new()), blobs.clone(), config);
    (ctx, blobs)
}
