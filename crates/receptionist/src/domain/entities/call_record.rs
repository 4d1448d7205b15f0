//! CallRecord - Persisted log entry for a processed speech turn

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::CallAnalysis;
use crate::domain::value_objects::{CallStatus, Sentiment};

/// A call record as stored in the call log.
///
/// `id` and `timestamp` are assigned at write time and never change.
/// `duration` starts at 0 and is the only field updated afterwards,
/// through a lookup by `call_sid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub id: Uuid,
    pub call_sid: String,
    pub caller: String,
    pub caller_number: String,
    pub topic: String,
    pub is_important: bool,
    pub sentiment: Sentiment,
    pub transcript: String,
    /// Call length in seconds
    #[serde(default)]
    pub duration: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: CallStatus,
}

/// Fields supplied by the orchestrator when appending a record
#[derive(Debug, Clone, PartialEq)]
pub struct NewCallRecord {
    pub call_sid: String,
    pub caller: String,
    pub caller_number: String,
    pub topic: String,
    pub is_important: bool,
    pub sentiment: Sentiment,
    pub transcript: String,
    pub duration: u32,
}

impl NewCallRecord {
    /// Build the record for one classified speech turn
    pub fn from_turn(
        call_sid: impl Into<String>,
        caller_number: impl Into<String>,
        transcript: impl Into<String>,
        analysis: &CallAnalysis,
    ) -> Self {
        Self {
            call_sid: call_sid.into(),
            caller: analysis.caller_display_name().to_string(),
            caller_number: caller_number.into(),
            topic: analysis.topic.clone(),
            is_important: analysis.is_important,
            sentiment: analysis.sentiment,
            transcript: transcript.into(),
            duration: 0,
        }
    }
}

impl CallRecord {
    /// Stamp a new record with a fresh id, the current time and `completed` status
    pub fn create(new: NewCallRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            call_sid: new.call_sid,
            caller: new.caller,
            caller_number: new.caller_number,
            topic: new.topic,
            is_important: new.is_important,
            sentiment: new.sentiment,
            transcript: new.transcript,
            duration: new.duration,
            timestamp: Utc::now(),
            status: CallStatus::Completed,
        }
    }
}
