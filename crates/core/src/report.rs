use serde::{Deserialize, Serialize};

use crate::employee::ValidatedItem;

/// Outcome of one import job.
///
/// Every processed item is either counted in `success_count` or listed in
/// `errors`, so `success_count + failure_count == processed_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub processed_count: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub errors: Vec<ValidatedItem>,
}

impl ImportReport {
    pub fn new(processed_count: usize) -> Self {
        Self {
            processed_count,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, item: ValidatedItem) {
        self.errors.push(item);
        self.failure_count = self.errors.len();
    }
}
