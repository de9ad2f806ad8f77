//! Transactional record store abstraction.
//!
//! A store holds two kinds of employee records: the primary record keyed by
//! employee number and the secondary record keyed by phone number. Writes
//! are submitted as an ordered list of [`ConditionalPut`]s that commit
//! together or not at all. Each put carries a [`Precondition`] that the
//! backend evaluates against the currently stored record for that key.

use async_trait::async_trait;
use roster_core::employee::Employee;
use roster_core::types::Timestamp;
use sqlx::FromRow;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Keys and records
// ---------------------------------------------------------------------------

pub const KIND_EMPLOYEE: &str = "employee";
pub const KIND_PHONE: &str = "phone";

/// Identity of one stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Primary record, keyed by employee number.
    Employee(String),
    /// Secondary record, keyed by phone number.
    Phone(String),
}

impl RecordKey {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Employee(_) => KIND_EMPLOYEE,
            Self::Phone(_) => KIND_PHONE,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Employee(v) | Self::Phone(v) => v,
        }
    }

    /// Rebuild a key from its stored `(kind, value)` pair.
    pub fn from_parts(kind: &str, value: String) -> Result<Self, StoreError> {
        match kind {
            KIND_EMPLOYEE => Ok(Self::Employee(value)),
            KIND_PHONE => Ok(Self::Phone(value)),
            other => Err(StoreError::Malformed(format!("unknown record kind '{other}'"))),
        }
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind(), self.value())
    }
}

/// Attributes persisted for one record.
///
/// The secondary record only carries `emp_no`, `ph_no` and `when_modified`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredRecord {
    pub emp_no: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub ph_no: Option<String>,
    pub when_modified: Timestamp,
}

impl StoredRecord {
    pub fn primary(employee: &Employee) -> Self {
        Self {
            emp_no: employee.emp_no.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            ph_no: employee.ph_no.clone(),
            when_modified: employee.when_modified,
        }
    }

    pub fn secondary(employee: &Employee, ph_no: &str) -> Self {
        Self {
            emp_no: employee.emp_no.clone(),
            first_name: None,
            last_name: None,
            ph_no: Some(ph_no.to_string()),
            when_modified: employee.when_modified,
        }
    }
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

/// Optimistic-concurrency guard for one put.
///
/// Holds when no record exists for the key, or when the stored record is
/// strictly older than `newer_than` and, if `owner` is set, belongs to that
/// employee number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precondition {
    pub newer_than: Timestamp,
    pub owner: Option<String>,
}

impl Precondition {
    pub fn newer_than(when: Timestamp) -> Self {
        Self {
            newer_than: when,
            owner: None,
        }
    }

    pub fn owned_by(mut self, emp_no: impl Into<String>) -> Self {
        self.owner = Some(emp_no.into());
        self
    }

    pub fn holds(&self, existing: Option<&StoredRecord>) -> bool {
        let Some(existing) = existing else {
            return true;
        };
        existing.when_modified < self.newer_than
            && self.owner.as_deref().map_or(true, |owner| existing.emp_no == owner)
    }
}

/// One operation of a conditional transaction.
#[derive(Debug, Clone)]
pub struct ConditionalPut {
    pub key: RecordKey,
    pub record: StoredRecord,
    pub condition: Precondition,
}

/// Per-operation condition result, reported in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionCheck {
    Passed,
    Failed,
}

impl ConditionCheck {
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    pub fn failed(self) -> bool {
        self == Self::Failed
    }
}

/// Result of a conditional transaction that reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactOutcome {
    /// Every condition held; all puts were applied.
    Committed,
    /// At least one condition failed; nothing was applied.
    Rejected(Vec<ConditionCheck>),
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

/// Durable store of employee records supporting atomic conditional writes.
///
/// Any `Err` is a transport-level failure (unreachable store, malformed
/// response); condition failures are reported through
/// [`TransactOutcome::Rejected`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Apply `puts` atomically if every precondition holds.
    async fn transact(&self, puts: Vec<ConditionalPut>) -> Result<TransactOutcome, StoreError>;

    /// Read the record stored under `key`.
    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, StoreError>;
}
