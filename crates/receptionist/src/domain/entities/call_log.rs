//! CallLog - Bounded, most-recent-first collection of call records
//!
//! Holds the ordering, truncation, back-fill and statistics rules shared by
//! every repository implementation.

use serde::{Deserialize, Serialize};

use super::call_record::{CallRecord, NewCallRecord};

/// Maximum number of records retained
pub const CALL_LOG_CAPACITY: usize = 100;

/// Number of records returned on the dashboard read path
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Aggregate statistics over the whole retained log. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStats {
    pub total_calls: u64,
    pub important_calls: u64,
    /// Mean duration in whole seconds, rounded half away from zero
    pub average_duration: u64,
}

impl CallStats {
    pub fn from_records(records: &[CallRecord]) -> Self {
        let total_calls = records.len() as u64;
        if total_calls == 0 {
            return Self::default();
        }

        let important_calls = records.iter().filter(|r| r.is_important).count() as u64;
        let total_duration: u64 = records.iter().map(|r| u64::from(r.duration)).sum();
        let average_duration = (total_duration as f64 / total_calls as f64).round() as u64;

        Self {
            total_calls,
            important_calls,
            average_duration,
        }
    }
}

/// Ordered call log, index 0 is the most recent record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallLog {
    records: Vec<CallRecord>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records already in most-recent-first order, dropping any beyond capacity
    pub fn from_records(mut records: Vec<CallRecord>) -> Self {
        records.truncate(CALL_LOG_CAPACITY);
        Self { records }
    }

    /// Stamp and prepend a new record, then drop the oldest beyond capacity
    pub fn append(&mut self, new: NewCallRecord) -> CallRecord {
        let record = CallRecord::create(new);
        self.records.insert(0, record.clone());
        self.records.truncate(CALL_LOG_CAPACITY);
        record
    }

    /// The `limit` most recent records, most-recent-first
    pub fn recent(&self, limit: usize) -> Vec<CallRecord> {
        self.records.iter().take(limit).cloned().collect()
    }

    pub fn stats(&self) -> CallStats {
        CallStats::from_records(&self.records)
    }

    /// Overwrite the duration of the most recent record with this `call_sid`.
    ///
    /// Returns `false` (and leaves the log untouched) when nothing matches.
    pub fn backfill_duration(&mut self, call_sid: &str, duration: u32) -> bool {
        match self.records.iter_mut().find(|r| r.call_sid == call_sid) {
            Some(record) => {
                record.duration = duration;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CallRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
