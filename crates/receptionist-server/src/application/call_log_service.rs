//! Call Log Application Service
//!
//! Wraps the repository with the failure policy of the request path:
//! failed writes are logged and dropped, failed reads degrade to an empty
//! snapshot.

use std::sync::Arc;

use receptionist::{CallLogRepository, CallRecord, CallStats, NewCallRecord, CALL_LOG_CAPACITY};

/// Dashboard view of the log
#[derive(Debug, Clone, PartialEq)]
pub struct CallLogSnapshot {
    pub logs: Vec<CallRecord>,
    pub stats: CallStats,
    pub success: bool,
}

impl CallLogSnapshot {
    fn unavailable() -> Self {
        Self {
            logs: Vec::new(),
            stats: CallStats::default(),
            success: false,
        }
    }
}

pub struct CallLogService {
    repo: Arc<dyn CallLogRepository>,
}

impl CallLogService {
    pub fn new(repo: Arc<dyn CallLogRepository>) -> Self {
        Self { repo }
    }

    /// Append a record; `None` when the write failed
    pub async fn record(&self, record: NewCallRecord) -> Option<CallRecord> {
        let call_sid = record.call_sid.clone();
        match self.repo.append(record).await {
            Ok(saved) => {
                tracing::info!(
                    call_sid = %saved.call_sid,
                    id = %saved.id,
                    important = saved.is_important,
                    "Call record saved"
                );
                Some(saved)
            }
            Err(e) => {
                tracing::error!(call_sid = %call_sid, error = %e, "Failed to save call record");
                None
            }
        }
    }

    /// Most recent `limit` records (capped at 100) and whole-log stats
    pub async fn dashboard(&self, limit: usize) -> CallLogSnapshot {
        let limit = limit.min(CALL_LOG_CAPACITY);
        match self.repo.snapshot().await {
            Ok(log) => CallLogSnapshot {
                logs: log.recent(limit),
                stats: log.stats(),
                success: true,
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to read call log");
                CallLogSnapshot::unavailable()
            }
        }
    }

    /// Set the duration of the most recent record for `call_sid`
    pub async fn backfill_duration(&self, call_sid: &str, duration: u32) -> bool {
        match self.repo.backfill_duration(call_sid, duration).await {
            Ok(true) => {
                tracing::info!(call_sid, duration, "Call duration back-filled");
                true
            }
            Ok(false) => {
                tracing::debug!(call_sid, "No call record to back-fill");
                false
            }
            Err(e) => {
                tracing::error!(call_sid, error = %e, "Failed to back-fill call duration");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use receptionist::{CallLog, DomainError, Sentiment};

    use crate::adapters::InMemoryCallLogRepository;

    /// Repository whose storage is always unavailable
    struct BrokenRepository;

    #[async_trait]
    impl CallLogRepository for BrokenRepository {
        async fn append(&self, _record: NewCallRecord) -> Result<CallRecord, DomainError> {
            Err(DomainError::Repository("disk full".into()))
        }

        async fn snapshot(&self) -> Result<CallLog, DomainError> {
            Err(DomainError::Repository("unreadable".into()))
        }

        async fn backfill_duration(&self, _sid: &str, _d: u32) -> Result<bool, DomainError> {
            Err(DomainError::Repository("unreadable".into()))
        }
    }

    fn new_record(sid: &str, duration: u32) -> NewCallRecord {
        NewCallRecord {
            call_sid: sid.to_string(),
            caller: "Unknown".to_string(),
            caller_number: "+15551234567".to_string(),
            topic: "Hello".to_string(),
            is_important: false,
            sentiment: Sentiment::Neutral,
            transcript: "hello".to_string(),
            duration,
        }
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let service = CallLogService::new(Arc::new(InMemoryCallLogRepository::new()));

        let snapshot = service.dashboard(50).await;

        assert!(snapshot.success);
        assert!(snapshot.logs.is_empty());
        assert_eq!(snapshot.stats, CallStats::default());
    }

    #[tokio::test]
    async fn test_dashboard_limit_and_stats() {
        let service = CallLogService::new(Arc::new(InMemoryCallLogRepository::new()));
        for i in 0..5 {
            service.record(new_record(&format!("CA{i}"), 10)).await;
        }

        let snapshot = service.dashboard(2).await;
        assert_eq!(snapshot.logs.len(), 2);
        assert_eq!(snapshot.logs[0].call_sid, "CA4");
        assert_eq!(snapshot.stats.total_calls, 5);

        let none = service.dashboard(0).await;
        assert!(none.success);
        assert!(none.logs.is_empty());
        assert_eq!(none.stats.total_calls, 5);

        assert_eq!(service.dashboard(500).await.logs.len(), 5);
    }

    #[tokio::test]
    async fn test_storage_failure_degrades() {
        let service = CallLogService::new(Arc::new(BrokenRepository));

        assert!(service.record(new_record("CA1", 0)).await.is_none());
        assert!(!service.backfill_duration("CA1", 30).await);

        let snapshot = service.dashboard(50).await;
        assert!(!snapshot.success);
        assert!(snapshot.logs.is_empty());
        assert_eq!(snapshot.stats, CallStats::default());
    }

    #[tokio::test]
    async fn test_backfill() {
        let service = CallLogService::new(Arc::new(InMemoryCallLogRepository::new()));
        service.record(new_record("CA1", 0)).await;

        assert!(service.backfill_duration("CA1", 42).await);
        assert!(!service.backfill_duration("CA404", 42).await);
        assert_eq!(service.dashboard(50).await.logs[0].duration, 42);
    }
}
