//! Transcript Classifier
//!
//! Turns a raw speech transcript into a `CallAnalysis`. Never fails
//! outward: any provider error, timeout or malformed answer yields
//! `CallAnalysis::fallback()`.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use receptionist::{CallAnalysis, ChatMessage, CompletionOptions, DomainError, LlmProvider};

use super::llm_call::complete_within;
use crate::config::Persona;

const TEMPERATURE: f32 = 0.7;

pub struct TranscriptClassifier {
    provider: Option<Arc<dyn LlmProvider>>,
    timeout: Duration,
    system_prompt: String,
}

impl TranscriptClassifier {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, timeout: Duration, persona: &Persona) -> Self {
        Self {
            provider,
            timeout,
            system_prompt: system_prompt(persona),
        }
    }

    /// Classify a transcript, falling back to the fixed brush-off verdict.
    ///
    /// The provider call is cut off at `deadline` even if the per-call
    /// timeout has not elapsed.
    pub async fn classify(
        &self,
        transcript: &str,
        caller_number: &str,
        deadline: Instant,
    ) -> CallAnalysis {
        match self.try_classify(transcript, caller_number, deadline).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(caller_number, error = %e, "Call analysis failed - using fallback");
                CallAnalysis::fallback()
            }
        }
    }

    async fn try_classify(
        &self,
        transcript: &str,
        caller_number: &str,
        deadline: Instant,
    ) -> Result<CallAnalysis, DomainError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| DomainError::ExternalService("No language model configured".into()))?;

        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(format!(
                "Analyze this call transcript from {caller_number}:\n\n\"{transcript}\""
            )),
        ];

        let response = complete_within(
            provider.as_ref(),
            &messages,
            &CompletionOptions::json(TEMPERATURE),
            self.timeout,
            deadline,
        )
        .await?;

        let content = response
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| DomainError::ExternalService("Empty analysis response".into()))?;

        serde_json::from_str(&content)
            .map_err(|e| DomainError::ExternalService(format!("Malformed analysis: {e}")))
    }
}

fn system_prompt(persona: &Persona) -> String {
    format!(
        r#"You are {assistant}, a highly intelligent AI assistant for {owner}.
Your task is to analyze phone call transcripts and determine:
1. If the call is important/urgent/business-related (true) or casual/spam/non-urgent (false)
2. The main topic of the call
3. The sentiment (positive, negative, neutral, urgent)
4. Extract caller's name if mentioned
5. Provide a brief summary
6. Whether the conversation should continue (true) or be politely ended (false)

Important calls include: business matters, urgent requests, family emergencies, important appointments.
Non-important calls include: spam, marketing, casual chit-chat, wrong numbers.

Respond ONLY with valid JSON in this exact format:
{{
  "isImportant": boolean,
  "topic": "string",
  "sentiment": "positive|negative|neutral|urgent",
  "callerName": "string or null",
  "summary": "string",
  "shouldContinue": boolean
}}"#,
        assistant = persona.assistant_name,
        owner = persona.owner_name,
    )
}
