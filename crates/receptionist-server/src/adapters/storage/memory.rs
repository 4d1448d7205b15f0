//! In-memory implementation of CallLogRepository

use async_trait::async_trait;
use tokio::sync::RwLock;

use receptionist::{CallLog, CallLogRepository, CallRecord, DomainError, NewCallRecord};

/// CallLogRepository that keeps the log in process memory
#[derive(Default)]
pub struct InMemoryCallLogRepository {
    log: RwLock<CallLog>,
}

impl InMemoryCallLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallLogRepository for InMemoryCallLogRepository {
    async fn append(&self, record: NewCallRecord) -> Result<CallRecord, DomainError> {
        Ok(self.log.write().await.append(record))
    }

    async fn snapshot(&self) -> Result<CallLog, DomainError> {
        Ok(self.log.read().await.clone())
    }

    async fn backfill_duration(
        &self,
        call_sid: &str,
        duration: u32,
    ) -> Result<bool, DomainError> {
        Ok(self.log.write().await.backfill_duration(call_sid, duration))
    }
}
