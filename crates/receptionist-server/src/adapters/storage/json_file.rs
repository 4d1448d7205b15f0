//! JSON file implementation of CallLogRepository
//!
//! The whole log is one JSON array, most-recent-first. Writers hold an async
//! mutex for the read-modify-write cycle and replace the file through a
//! rename, so readers always see the last committed log without locking.
//!
//! A file that no longer parses is moved aside to
//! `<name>.corrupt-<timestamp>` by the next writer, which then starts a
//! fresh log. Reads keep failing until that write happens.

use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use receptionist::{CallLog, CallLogRepository, CallRecord, DomainError, NewCallRecord};

/// File-backed CallLogRepository
pub struct JsonFileCallLogRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileCallLogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "call-logs.json".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// Raw file contents, `None` when the file is missing or blank
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>, DomainError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::Repository(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn load(&self) -> Result<CallLog, DomainError> {
        let Some(bytes) = self.read_bytes().await? else {
            return Ok(CallLog::new());
        };

        let records: Vec<CallRecord> = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::Repository(format!("Corrupt call log {}: {e}", self.path.display()))
        })?;

        Ok(CallLog::from_records(records))
    }

    /// Load for a read-modify-write cycle. Caller must hold `write_lock`.
    async fn load_for_write(&self) -> Result<CallLog, DomainError> {
        let Some(bytes) = self.read_bytes().await? else {
            return Ok(CallLog::new());
        };

        match serde_json::from_slice::<Vec<CallRecord>>(&bytes) {
            Ok(records) => Ok(CallLog::from_records(records)),
            Err(e) => {
                let quarantine = self.quarantine().await?;
                tracing::warn!(
                    path = %self.path.display(),
                    moved_to = %quarantine.display(),
                    error = %e,
                    "⚠️  Corrupt call log set aside - starting a new log"
                );
                Ok(CallLog::new())
            }
        }
    }

    async fn quarantine(&self) -> Result<PathBuf, DomainError> {
        let target = self.sibling(&format!(
            ".corrupt-{}",
            Utc::now().format("%Y%m%dT%H%M%S%.3fZ")
        ));
        tokio::fs::rename(&self.path, &target).await.map_err(|e| {
            DomainError::Repository(format!(
                "Failed to move corrupt {} aside: {e}",
                self.path.display()
            ))
        })?;
        Ok(target)
    }

    async fn store(&self, log: &CallLog) -> Result<(), DomainError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                DomainError::Repository(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }

        let body = serde_json::to_vec_pretty(log.records())
            .map_err(|e| DomainError::Repository(format!("Failed to serialize call log: {e}")))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, body).await.map_err(|e| {
            DomainError::Repository(format!("Failed to write {}: {e}", temp.display()))
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            DomainError::Repository(format!("Failed to replace {}: {e}", self.path.display()))
        })?;

        Ok(())
    }
}

#[async_trait]
impl CallLogRepository for JsonFileCallLogRepository {
    async fn append(&self, record: NewCallRecord) -> Result<CallRecord, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut log = self.load_for_write().await?;
        let saved = log.append(record);
        self.store(&log).await?;

        Ok(saved)
    }

    async fn snapshot(&self) -> Result<CallLog, DomainError> {
        self.load().await
    }

    async fn backfill_duration(
        &self,
        call_sid: &str,
        duration: u32,
    ) -> Result<bool, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut log = self.load_for_write().await?;
        if !log.backfill_duration(call_sid, duration) {
            return Ok(false);
        }
        self.store(&log).await?;

        Ok(true)
    }
}
