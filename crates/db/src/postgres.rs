//! PostgreSQL record store.
//!
//! Each conditional put becomes a guarded upsert: the row is inserted when
//! absent, or updated only when the `WHERE` guard mirroring the
//! [`Precondition`](crate::store::Precondition) matches. All puts of one
//! transaction run inside a single SQL transaction, which is rolled back as
//! soon as any guard rejected its row.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::store::{
    ConditionCheck, ConditionalPut, RecordKey, RecordStore, StoredRecord, TransactOutcome,
};
use crate::DbPool;

/// Column list for record queries.
const COLUMNS: &str = "emp_no, first_name, last_name, ph_no, when_modified";

const GUARDED_UPSERT: &str = "\
    INSERT INTO employee_records
        (record_kind, record_key, emp_no, first_name, last_name, ph_no, when_modified)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    ON CONFLICT (record_kind, record_key) DO UPDATE SET
        emp_no = EXCLUDED.emp_no,
        first_name = EXCLUDED.first_name,
        last_name = EXCLUDED.last_name,
        ph_no = EXCLUDED.ph_no,
        when_modified = EXCLUDED.when_modified
    WHERE employee_records.when_modified < $8
      AND ($9::TEXT IS NULL OR employee_records.emp_no = $9)";

/// Record store backed by the `employee_records` table.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn transact(&self, puts: Vec<ConditionalPut>) -> Result<TransactOutcome, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut checks = Vec::with_capacity(puts.len());

        for put in &puts {
            let result = sqlx::query(GUARDED_UPSERT)
                .bind(put.key.kind())
                .bind(put.key.value())
                .bind(&put.record.emp_no)
                .bind(&put.record.first_name)
                .bind(&put.record.last_name)
                .bind(&put.record.ph_no)
                .bind(put.record.when_modified)
                .bind(put.condition.newer_than)
                .bind(put.condition.owner.as_deref())
                .execute(&mut *tx)
                .await?;

            // A guarded-out upsert touches no row.
            checks.push(ConditionCheck::from_bool(result.rows_affected() == 1));
        }

        if checks.iter().any(|c| c.failed()) {
            tx.rollback().await?;
            tracing::debug!(?checks, "Conditional transaction rejected");
            return Ok(TransactOutcome::Rejected(checks));
        }

        tx.commit().await?;
        Ok(TransactOutcome::Committed)
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM employee_records
             WHERE record_kind = $1 AND record_key = $2"
        );
        let record = sqlx::query_as::<_, StoredRecord>(&query)
            .bind(key.kind())
            .bind(key.value())
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }
}
