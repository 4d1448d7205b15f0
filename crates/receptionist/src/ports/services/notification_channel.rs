//! Notification Channel Port
//!
//! One outbound alert channel (email, WhatsApp, ...). Each channel is
//! configured independently and may be absent.

use async_trait::async_trait;

use crate::domain::entities::NotificationPayload;
use crate::domain::errors::DomainError;

#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Channel name used in logs (e.g., "email", "whatsapp")
    fn name(&self) -> &str;

    /// Whether the credentials this channel needs are present.
    ///
    /// Unconfigured channels are skipped without calling `send`.
    fn is_configured(&self) -> bool;

    /// Deliver one alert. No retry is attempted by callers.
    async fn send(&self, payload: &NotificationPayload) -> Result<(), DomainError>;
}
