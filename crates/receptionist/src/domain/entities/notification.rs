//! NotificationPayload - Alert content for an important call

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::CallAnalysis;

/// Alert sent to the owner's channels. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub caller: String,
    pub caller_number: String,
    pub topic: String,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

impl NotificationPayload {
    pub fn from_analysis(analysis: &CallAnalysis, caller_number: impl Into<String>) -> Self {
        Self {
            caller: analysis.caller_display_name().to_string(),
            caller_number: caller_number.into(),
            topic: analysis.topic.clone(),
            summary: analysis.summary.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Human-readable time used in alert bodies
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}
