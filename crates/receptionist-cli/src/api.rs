//! Receptionist API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

/// API Client for the receptionist server
pub struct ReceptionistClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    pub call_sid: String,
    pub caller: String,
    pub caller_number: String,
    pub topic: String,
    pub is_important: bool,
    pub sentiment: String,
    pub transcript: String,
    pub duration: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStats {
    pub total_calls: u64,
    pub important_calls: u64,
    pub average_duration: u64,
}

#[derive(Debug, Deserialize)]
pub struct CallLogsResponse {
    pub logs: Vec<CallRecord>,
    pub stats: CallStats,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl ReceptionistClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Health check
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to Receptionist API")?;

        if !resp.status().is_success() {
            bail!("Health check failed ({})", resp.status());
        }

        resp.json().await.context("Failed to parse response")
    }

    /// Recent calls and statistics
    pub async fn call_logs(&self, limit: Option<usize>) -> Result<CallLogsResponse> {
        let mut url = format!("{}/api/call-logs", self.base_url);
        if let Some(limit) = limit {
            url.push_str(&format!("?limit={limit}"));
        }

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to Receptionist API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let logs: CallLogsResponse = resp.json().await.context("Failed to parse response")?;

        if !logs.success {
            bail!("Server could not read the call log");
        }

        Ok(logs)
    }
}
