//! WhatsApp Channel (Meta Graph API)
//!
//! Sends a text message to the owner's WhatsApp number through the
//! Cloud API `messages` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use receptionist::{DomainError, NotificationChannel, NotificationPayload};

use crate::adapters::formatters::format_whatsapp_text;
use crate::config::WhatsAppSettings;

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0";

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody,
}

#[derive(Debug, Serialize)]
struct TextBody {
    body: String,
}

/// WhatsApp implementation of NotificationChannel
pub struct WhatsAppChannel {
    client: Client,
    settings: Option<WhatsAppSettings>,
    assistant_name: String,
}

impl WhatsAppChannel {
    pub fn new(settings: Option<WhatsAppSettings>, assistant_name: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            settings,
            assistant_name: assistant_name.into(),
        }
    }

    fn endpoint(settings: &WhatsAppSettings) -> String {
        format!("{GRAPH_API_BASE}/{}/messages", settings.phone_number_id)
    }

    fn build_message<'a>(
        &self,
        settings: &'a WhatsAppSettings,
        payload: &NotificationPayload,
    ) -> TextMessage<'a> {
        TextMessage {
            messaging_product: "whatsapp",
            to: &settings.recipient,
            kind: "text",
            text: TextBody {
                body: format_whatsapp_text(payload, &self.assistant_name),
            },
        }
    }
}

#[async_trait]
impl NotificationChannel for WhatsAppChannel {
    fn name(&self) -> &str {
        "whatsapp"
    }

    fn is_configured(&self) -> bool {
        self.settings.is_some()
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<(), DomainError> {
        let settings = self
            .settings
            .as_ref()
            .ok_or_else(|| DomainError::Validation("WhatsApp credentials not configured".into()))?;

        let response = self
            .client
            .post(Self::endpoint(settings))
            .header("Authorization", format!("Bearer {}", settings.access_token))
            .json(&self.build_message(settings, payload))
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("WhatsApp request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "No response body".to_string());
            return Err(DomainError::ExternalService(format!(
                "WhatsApp API error ({status}): {body}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn settings() -> WhatsAppSettings {
        WhatsAppSettings {
            access_token: "token".to_string(),
            phone_number_id: "1234567890".to_string(),
            recipient: "923001234567".to_string(),
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            WhatsAppChannel::endpoint(&settings()),
            "https://graph.facebook.com/v18.0/1234567890/messages"
        );
    }

    #[test]
    fn test_message_shape() {
        let channel = WhatsAppChannel::new(Some(settings()), "Iqra");
        let settings = settings();
        let payload = NotificationPayload {
            caller: "Sara".to_string(),
            caller_number: "+15550001111".to_string(),
            topic: "Invoice".to_string(),
            summary: "Asked about the overdue invoice".to_string(),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_value(channel.build_message(&settings, &payload)).unwrap();

        assert_eq!(json["messaging_product"], "whatsapp");
        assert_eq!(json["to"], "923001234567");
        assert_eq!(json["type"], "text");
        assert!(json["text"]["body"]
            .as_str()
            .unwrap()
            .contains("*Caller:* Sara"));
    }

    #[test]
    fn test_is_configured() {
        assert!(WhatsAppChannel::new(Some(settings()), "Iqra").is_configured());
        assert!(!WhatsAppChannel::new(None, "Iqra").is_configured());
    }
}
