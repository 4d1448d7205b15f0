//! CallLog Repository Port
//!
//! Abstract interface for call log persistence operations.

use async_trait::async_trait;

use crate::domain::entities::{CallLog, CallRecord, NewCallRecord};
use crate::domain::errors::DomainError;

/// Repository interface for the call log
///
/// Implementations must serialize `append` and `backfill_duration` so
/// concurrent turns neither lose nor duplicate records, and the log stays
/// most-recent-first and capped at `CALL_LOG_CAPACITY`.
#[async_trait]
pub trait CallLogRepository: Send + Sync {
    /// Stamp, prepend and persist a record, returning the stored copy
    async fn append(&self, record: NewCallRecord) -> Result<CallRecord, DomainError>;

    /// The whole retained log as of one committed version.
    ///
    /// Callers derive `recent(limit)` and `stats()` from the same snapshot,
    /// so the two never disagree.
    async fn snapshot(&self) -> Result<CallLog, DomainError>;

    /// Set the duration of the most recent record with this `call_sid`.
    ///
    /// Returns `Ok(false)` when no record matches.
    async fn backfill_duration(&self, call_sid: &str, duration: u32)
        -> Result<bool, DomainError>;
}
