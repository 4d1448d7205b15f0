//! Test doubles for the language model and notification channels

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use receptionist::{
    CallAnalysis, ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider,
    NotificationChannel, NotificationPayload, ResponseFormat, Sentiment, TokenUsage,
};

/// Analysis with the given flags and otherwise realistic values
pub fn analysis(is_important: bool, should_continue: bool) -> CallAnalysis {
    CallAnalysis {
        is_important,
        topic: if is_important {
            "Urgent call back".to_string()
        } else {
            "Casual chat".to_string()
        },
        sentiment: if is_important {
            Sentiment::Urgent
        } else {
            Sentiment::Neutral
        },
        caller_name: Some("Sara".to_string()),
        summary: "Caller asked for a call back".to_string(),
        should_continue,
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
}

/// LlmProvider answering JSON requests with a fixed analysis and text
/// requests with a fixed reply
pub struct StubLlm {
    analysis_json: Option<String>,
    reply: Option<String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubLlm {
    pub fn answering(analysis: &CallAnalysis, reply: &str) -> Self {
        let json = serde_json::to_string(analysis).unwrap();
        Self::raw(&json, reply)
    }

    pub fn raw(analysis_json: &str, reply: &str) -> Self {
        Self {
            analysis_json: Some(analysis_json.to_string()),
            reply: Some(reply.to_string()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with an external-service error
    pub fn failing() -> Self {
        Self {
            analysis_json: None,
            reply: None,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: messages.to_vec(),
            options: options.clone(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let content = match options.response_format {
            ResponseFormat::JsonObject => self.analysis_json.clone(),
            ResponseFormat::Text => self.reply.clone(),
        }
        .ok_or_else(|| DomainError::ExternalService("stub provider down".into()))?;

        Ok(CompletionResponse {
            content: Some(content),
            model: "stub".to_string(),
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_id(&self) -> &str {
        "stub"
    }
}

/// NotificationChannel counting send attempts
pub struct CountingChannel {
    name: &'static str,
    configured: bool,
    fails: bool,
    sends: AtomicUsize,
}

impl CountingChannel {
    pub fn working(name: &'static str) -> Self {
        Self {
            name,
            configured: true,
            fails: false,
            sends: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            fails: true,
            ..Self::working(name)
        }
    }

    pub fn unconfigured(name: &'static str) -> Self {
        Self {
            configured: false,
            ..Self::working(name)
        }
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationChannel for CountingChannel {
    fn name(&self) -> &str {
        self.name
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(&self, _payload: &NotificationPayload) -> Result<(), DomainError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        if self.fails {
            Err(DomainError::ExternalService(format!("{} unreachable", self.name)))
        } else {
            Ok(())
        }
    }
}
