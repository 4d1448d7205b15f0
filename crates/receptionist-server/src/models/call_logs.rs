//! Call Log DTOs - Dashboard query

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use receptionist::{CallRecord, CallStats};

use crate::application::CallLogSnapshot;

/// Query parameters for the call log
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallLogsQuery {
    /// Number of records (default 50, capped at 100)
    pub limit: Option<usize>,
}

/// A call record as returned to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallRecordResponse {
    pub id: Uuid,
    pub call_sid: String,
    pub caller: String,
    pub caller_number: String,
    pub topic: String,
    pub is_important: bool,
    /// positive | negative | neutral | urgent
    pub sentiment: String,
    pub transcript: String,
    /// Seconds
    pub duration: u32,
    pub timestamp: DateTime<Utc>,
    pub status: String,
}

impl From<CallRecord> for CallRecordResponse {
    fn from(record: CallRecord) -> Self {
        Self {
            id: record.id,
            call_sid: record.call_sid,
            caller: record.caller,
            caller_number: record.caller_number,
            topic: record.topic,
            is_important: record.is_important,
            sentiment: record.sentiment.to_string(),
            transcript: record.transcript,
            duration: record.duration,
            timestamp: record.timestamp,
            status: record.status.to_string(),
        }
    }
}

/// Aggregates over the whole retained log
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallStatsResponse {
    pub total_calls: u64,
    pub important_calls: u64,
    pub average_duration: u64,
}

impl From<CallStats> for CallStatsResponse {
    fn from(stats: CallStats) -> Self {
        Self {
            total_calls: stats.total_calls,
            important_calls: stats.important_calls,
            average_duration: stats.average_duration,
        }
    }
}

/// Call log response. `success=false` means the store could not be read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallLogsResponse {
    pub logs: Vec<CallRecordResponse>,
    pub stats: CallStatsResponse,
    pub success: bool,
}

impl From<CallLogSnapshot> for CallLogsResponse {
    fn from(snapshot: CallLogSnapshot) -> Self {
        Self {
            logs: snapshot.logs.into_iter().map(Into::into).collect(),
            stats: snapshot.stats.into(),
            success: snapshot.success,
        }
    }
}
