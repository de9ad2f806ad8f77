//! Batch import orchestration.
//!
//! Walks validated items, hands error-free ones to the writer and folds the
//! outcomes into an [`ImportReport`]. Every employee is written in its own
//! transaction; unrelated employees are never coupled in one write.

use std::collections::HashMap;

use futures::stream::{self, StreamExt, TryStreamExt};
use roster_core::employee::ValidatedItem;
use roster_core::report::ImportReport;
use roster_db::{RecordStore, StoreError};

use crate::writer::{write_one, WriteOutcome};

/// Error recorded for an error-free item that carries nothing to write.
pub const REASON_MISSING_PAYLOAD: &str = "Employee payload missing.";

/// How an import job schedules its store transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteStrategy {
    /// One transaction at a time, in input order.
    #[default]
    Sequential,
    /// Up to `concurrency` transactions in flight. Outcomes are still
    /// attributed to their items and reported in input order.
    Bounded { concurrency: usize },
}

impl WriteStrategy {
    pub fn from_concurrency(concurrency: usize) -> Self {
        if concurrency <= 1 {
            Self::Sequential
        } else {
            Self::Bounded { concurrency }
        }
    }
}

/// Import a batch of validated items.
///
/// Items that already carry errors are reported as failures without
/// touching the store. A transport failure aborts the batch: items not yet
/// attempted are never written and the error is returned in place of a
/// report.
pub async fn import_batch(
    store: &dyn RecordStore,
    items: Vec<ValidatedItem>,
    strategy: WriteStrategy,
) -> Result<ImportReport, StoreError> {
    match strategy {
        WriteStrategy::Sequential => import_sequential(store, items).await,
        WriteStrategy::Bounded { concurrency } => {
            import_bounded(store, items, concurrency.max(1)).await
        }
    }
}

async fn import_sequential(
    store: &dyn RecordStore,
    items: Vec<ValidatedItem>,
) -> Result<ImportReport, StoreError> {
    let mut report = ImportReport::new(items.len());

    for item in items {
        let outcome = match writable(&item) {
            Some(employee) => Some(write_one(store, employee).await?),
            None => None,
        };
        settle(&mut report, item, outcome);
    }

    Ok(report)
}

async fn import_bounded(
    store: &dyn RecordStore,
    items: Vec<ValidatedItem>,
    concurrency: usize,
) -> Result<ImportReport, StoreError> {
    let writes: Vec<_> = items
        .iter()
        .enumerate()
        .filter_map(|(pos, item)| writable(item).map(|employee| (pos, employee)))
        .map(|(pos, employee)| async move {
            write_one(store, employee)
                .await
                .map(|outcome| (pos, outcome))
        })
        .collect();
    let mut outcomes: HashMap<usize, WriteOutcome> = stream::iter(writes)
        .buffer_unordered(concurrency)
        .try_collect()
        .await?;

    let mut report = ImportReport::new(items.len());
    for (pos, item) in items.into_iter().enumerate() {
        let outcome = outcomes.remove(&pos);
        settle(&mut report, item, outcome);
    }

    Ok(report)
}

/// The employee to write for `item`, if it is eligible for writing.
fn writable(item: &ValidatedItem) -> Option<&roster_core::employee::Employee> {
    if item.is_valid() {
        item.employee.as_ref()
    } else {
        None
    }
}

/// Fold one item into the report. `outcome` is `None` when the item was
/// not written.
fn settle(report: &mut ImportReport, mut item: ValidatedItem, outcome: Option<WriteOutcome>) {
    match outcome {
        Some(WriteOutcome::Success) => report.record_success(),
        Some(WriteOutcome::Conflict(reasons)) => {
            item.errors.extend(reasons);
            report.record_failure(item);
        }
        None => {
            if item.is_valid() {
                item.errors.push(REASON_MISSING_PAYLOAD.to_string());
            }
            report.record_failure(item);
        }
    }
}
