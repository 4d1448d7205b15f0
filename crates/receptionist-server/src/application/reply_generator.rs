//! Reply Generator
//!
//! Produces the short spoken reply for a classified turn.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use receptionist::{CallAnalysis, ChatMessage, CompletionOptions, DomainError, LlmProvider};

use super::llm_call::complete_within;
use crate::config::Persona;

const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 150;

/// Spoken when the provider answers with nothing
pub const EMPTY_REPLY: &str = "Thank you for calling.";
const NOT_IMPORTANT_FALLBACK: &str = "Thank you for calling. Have a wonderful day!";

pub struct ReplyGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
    timeout: Duration,
    system_prompt: String,
    important_fallback: String,
}

impl ReplyGenerator {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, timeout: Duration, persona: &Persona) -> Self {
        Self {
            provider,
            timeout,
            system_prompt: system_prompt(persona),
            important_fallback: format!(
                "I understand. I'll make sure {} receives your message right away. \
                 Is there anything else you'd like me to note?",
                persona.owner_short_name
            ),
        }
    }

    /// Generate the reply, falling back to a canned line chosen by importance
    pub async fn generate(
        &self,
        transcript: &str,
        analysis: &CallAnalysis,
        deadline: Instant,
    ) -> String {
        match self.try_generate(transcript, analysis, deadline).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Reply generation failed - using canned reply");
                self.fallback(analysis).to_string()
            }
        }
    }

    fn fallback(&self, analysis: &CallAnalysis) -> &str {
        if analysis.is_important {
            &self.important_fallback
        } else {
            NOT_IMPORTANT_FALLBACK
        }
    }

    async fn try_generate(
        &self,
        transcript: &str,
        analysis: &CallAnalysis,
        deadline: Instant,
    ) -> Result<String, DomainError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| DomainError::ExternalService("No language model configured".into()))?;

        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(format!(
                "The caller said: \"{transcript}\"\n\n\
                 Call analysis:\n\
                 - Important: {}\n\
                 - Topic: {}\n\
                 - Sentiment: {}\n\n\
                 Generate an appropriate response.",
                analysis.is_important, analysis.topic, analysis.sentiment
            )),
        ];

        let response = complete_within(
            provider.as_ref(),
            &messages,
            &CompletionOptions::text(TEMPERATURE, MAX_TOKENS),
            self.timeout,
            deadline,
        )
        .await?;

        Ok(response
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }
}

fn system_prompt(persona: &Persona) -> String {
    format!(
        r#"You are {assistant}, a warm, polite, and intelligent AI assistant for {owner}.
You have a soft, calm, and lovely demeanor. You speak naturally with emotional intelligence.
You can understand both Urdu and English context, though you respond in English for this system.

Your personality:
- Warm and welcoming (use "Assalamualaikum" appropriately)
- Professional yet friendly
- Empathetic and emotionally intelligent
- Clear and articulate
- Culturally aware (respect Islamic and Pakistani cultural norms)

For IMPORTANT calls: engage professionally, gather information, assure them their message will be conveyed.
For NON-IMPORTANT calls: be polite but brief, gracefully end the conversation.

Keep responses natural, conversational, and under 50 words unless more detail is needed."#,
        assistant = persona.assistant_name,
        owner = persona.owner_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{analysis, StubLlm};
    use receptionist::ResponseFormat;

    fn deadline() -> Instant {
        Instant::now() + Duration::from_secs(30)
    }

    fn generator(stub: Option<Arc<StubLlm>>) -> ReplyGenerator {
        ReplyGenerator::new(
            stub.map(|s| s as Arc<dyn LlmProvider>),
            Duration::from_secs(5),
            &Persona::default(),
        )
    }

    #[tokio::test]
    async fn test_generate_uses_provider_text() {
        let stub = Arc::new(StubLlm::answering(&analysis(true, true), "  I will pass it on.  "));
        let reply = generator(Some(stub.clone()))
            .generate("Please call me back", &analysis(true, true), deadline())
            .await;

        assert_eq!(reply, "I will pass it on.");

        let request = stub.last_request().unwrap();
        assert_eq!(request.options.response_format, ResponseFormat::Text);
        assert_eq!(request.options.max_tokens, Some(150));
        assert!(request.messages[1].content.contains("- Important: true"));
        assert!(request.messages[1].content.contains("- Sentiment: urgent"));
    }

    #[tokio::test]
    async fn test_empty_reply() {
        let stub = Arc::new(StubLlm::answering(&analysis(false, false), ""));
        let reply = generator(Some(stub))
            .generate("hi", &analysis(false, false), deadline())
            .await;

        assert_eq!(reply, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_fallback_depends_on_importance() {
        let important = generator(Some(Arc::new(StubLlm::failing())))
            .generate("hi", &analysis(true, true), deadline())
            .await;
        assert_eq!(
            important,
            "I understand. I'll make sure Eman receives your message right away. \
             Is there anything else you'd like me to note?"
        );

        let casual = generator(None).generate("hi", &analysis(false, false), deadline()).await;
        assert_eq!(casual, NOT_IMPORTANT_FALLBACK);
    }
}
