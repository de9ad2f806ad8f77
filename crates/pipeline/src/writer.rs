//! Uniqueness-enforcing writer.
//!
//! Commits one employee as an atomic conditional transaction of up to two
//! puts: the primary record keyed by employee number and, when the employee
//! has a phone number, the secondary record keyed by that number. The
//! secondary condition also requires the stored record to belong to the
//! same employee, so two employees can never claim one phone number.

use roster_core::employee::Employee;
use roster_db::{
    ConditionalPut, Precondition, RecordKey, RecordStore, StoreError, StoredRecord, TransactOutcome,
};

pub const REASON_RECENTLY_UPDATED: &str = "Employee item recently updated.";
pub const REASON_DUPLICATE_PH_NO: &str = "Duplicate phNo value detected.";

/// Classified result of a write that reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Success,
    /// The store rejected the transaction; one reason per failed condition.
    Conflict(Vec<String>),
}

/// Build the conditional puts for `employee`, primary record first.
pub fn build_transaction(employee: &Employee) -> Vec<ConditionalPut> {
    let mut puts = vec![ConditionalPut {
        key: RecordKey::Employee(employee.pk.clone()),
        record: StoredRecord::primary(employee),
        condition: Precondition::newer_than(employee.when_modified),
    }];

    if let Some(ph_no) = &employee.ph_no {
        puts.push(ConditionalPut {
            key: RecordKey::Phone(ph_no.clone()),
            record: StoredRecord::secondary(employee, ph_no),
            condition: Precondition::newer_than(employee.when_modified)
                .owned_by(employee.emp_no.clone()),
        });
    }

    puts
}

/// Write one employee. Does not retry.
///
/// Transport failures are returned as `Err`; condition failures come back
/// as [`WriteOutcome::Conflict`].
pub async fn write_one(
    store: &dyn RecordStore,
    employee: &Employee,
) -> Result<WriteOutcome, StoreError> {
    let puts = build_transaction(employee);
    let submitted = puts.len();

    match store.transact(puts).await? {
        TransactOutcome::Committed => {
            tracing::debug!(emp_no = %employee.emp_no, "Employee committed");
            Ok(WriteOutcome::Success)
        }
        TransactOutcome::Rejected(checks) => {
            if checks.len() != submitted {
                return Err(StoreError::Malformed(format!(
                    "expected {submitted} condition results, got {}",
                    checks.len()
                )));
            }

            let reasons: Vec<String> = checks
                .iter()
                .zip([REASON_RECENTLY_UPDATED, REASON_DUPLICATE_PH_NO])
                .filter(|(check, _)| check.failed())
                .map(|(_, reason)| reason.to_string())
                .collect();

            if reasons.is_empty() {
                return Err(StoreError::Malformed(
                    "transaction rejected without a failed condition".into(),
                ));
            }

            tracing::debug!(emp_no = %employee.emp_no, ?reasons, "Employee write rejected");
            Ok(WriteOutcome::Conflict(reasons))
        }
    }
}
