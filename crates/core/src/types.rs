use chrono::SubsecRound;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current time truncated to millisecond precision.
///
/// Batch timestamps are compared for strict ordering after a round trip
/// through the record store, so they must not carry more precision than the
/// store keeps.
pub fn batch_timestamp() -> Timestamp {
    chrono::Utc::now().trunc_subsecs(3)
}
