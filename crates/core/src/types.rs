/// Primary key type for every table. The schema uses BIGSERIAL ids.
pub type DbId = i64;

/// Timestamps are always UTC; Postgres stores them as `timestamptz`.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
