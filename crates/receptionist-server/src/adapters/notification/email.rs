//! Email Channel (SMTP via Gmail)

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use receptionist::{DomainError, NotificationChannel, NotificationPayload};

use crate::adapters::formatters::{format_email_html, format_email_subject};
use crate::config::EmailSettings;

const SMTP_RELAY: &str = "smtp.gmail.com";

/// Email implementation of NotificationChannel
pub struct EmailChannel {
    settings: Option<EmailSettings>,
    assistant_name: String,
}

impl EmailChannel {
    pub fn new(settings: Option<EmailSettings>, assistant_name: impl Into<String>) -> Self {
        Self {
            settings,
            assistant_name: assistant_name.into(),
        }
    }

    fn build_message(
        &self,
        settings: &EmailSettings,
        payload: &NotificationPayload,
    ) -> Result<Message, DomainError> {
        let from: Mailbox = format!("{} AI Assistant <{}>", self.assistant_name, settings.user)
            .parse()
            .map_err(|e| DomainError::Validation(format!("Invalid sender address: {e}")))?;
        let to: Mailbox = settings
            .recipient
            .parse()
            .map_err(|e| DomainError::Validation(format!("Invalid recipient address: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(format_email_subject(payload))
            .header(ContentType::TEXT_HTML)
            .body(format_email_html(payload, &self.assistant_name))
            .map_err(|e| DomainError::ExternalService(format!("Failed to build email: {e}")))
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &str {
        "email"
    }

    fn is_configured(&self) -> bool {
        self.settings.is_some()
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<(), DomainError> {
        let settings = self
            .settings
            .as_ref()
            .ok_or_else(|| DomainError::Validation("Email credentials not configured".into()))?;

        let message = self.build_message(settings, payload)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_RELAY)
            .map_err(|e| DomainError::ExternalService(format!("SMTP setup failed: {e}")))?
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.app_password.clone(),
            ))
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| DomainError::ExternalService(format!("SMTP send failed: {e}")))?;

        Ok(())
    }
}
