//! Notification Fan-out
//!
//! Sends one alert to every configured channel concurrently. Each channel
//! fails on its own; nothing is retried.

use std::sync::Arc;
use tokio::task::{JoinHandle, JoinSet};

use receptionist::{NotificationChannel, NotificationPayload};

/// Outcome counts of one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct NotificationService {
    channels: Vec<Arc<dyn NotificationChannel>>,
}

impl NotificationService {
    pub fn new(channels: Vec<Arc<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    /// Names of channels that have credentials
    pub fn configured_channels(&self) -> Vec<&str> {
        self.channels
            .iter()
            .filter(|c| c.is_configured())
            .map(|c| c.name())
            .collect()
    }

    /// Deliver to all configured channels and wait for every attempt
    pub async fn notify(&self, payload: &NotificationPayload) -> DispatchReport {
        let mut report = DispatchReport::default();
        let mut sends = JoinSet::new();

        for channel in &self.channels {
            if !channel.is_configured() {
                tracing::info!(channel = channel.name(), "Channel not configured - skipping");
                report.skipped += 1;
                continue;
            }

            let channel = Arc::clone(channel);
            let payload = payload.clone();
            sends.spawn(async move {
                let result = channel.send(&payload).await;
                (channel, result)
            });
        }

        while let Some(joined) = sends.join_next().await {
            match joined {
                Ok((channel, Ok(()))) => {
                    tracing::info!(channel = channel.name(), caller = %payload.caller, "✅ Notification sent");
                    report.sent += 1;
                }
                Ok((channel, Err(e))) => {
                    tracing::error!(channel = channel.name(), error = %e, "Notification failed");
                    report.failed += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Notification task aborted");
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Launch `notify` on its own task without waiting for it.
    ///
    /// Callers on the request path drop the handle.
    pub fn dispatch(self: &Arc<Self>, payload: NotificationPayload) -> JoinHandle<DispatchReport> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.notify(&payload).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::CountingChannel;
    use chrono::Utc;

    fn fan_out(channels: &[&Arc<CountingChannel>]) -> NotificationService {
        NotificationService::new(
            channels
                .iter()
                .map(|c| Arc::clone(c) as Arc<dyn NotificationChannel>)
                .collect(),
        )
    }

    fn payload() -> NotificationPayload {
        NotificationPayload {
            caller: "Sara".to_string(),
            caller_number: "+15551234567".to_string(),
            topic: "Contract".to_string(),
            summary: "Needs a call back".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_channel() {
        let email = Arc::new(CountingChannel::failing("email"));
        let whatsapp = Arc::new(CountingChannel::working("whatsapp"));
        let service = fan_out(&[&email, &whatsapp]);

        let report = service.notify(&payload()).await;

        assert_eq!(
            report,
            DispatchReport {
                sent: 1,
                skipped: 0,
                failed: 1
            }
        );
        assert_eq!(email.sends(), 1);
        assert_eq!(whatsapp.sends(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_channels_make_no_calls() {
        let email = Arc::new(CountingChannel::unconfigured("email"));
        let whatsapp = Arc::new(CountingChannel::unconfigured("whatsapp"));
        let service = fan_out(&[&email, &whatsapp]);

        let report = service.notify(&payload()).await;

        assert_eq!(report.skipped, 2);
        assert_eq!(report.sent + report.failed, 0);
        assert_eq!(email.sends() + whatsapp.sends(), 0);
        assert!(service.configured_channels().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_runs_detached() {
        let channel = Arc::new(CountingChannel::working("email"));
        let service = Arc::new(fan_out(&[&channel]));

        let report = service.dispatch(payload()).await.unwrap();

        assert_eq!(report.sent, 1);
        assert_eq!(channel.sends(), 1);
    }
}
