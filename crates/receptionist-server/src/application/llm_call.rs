//! Bounded language-model invocation

use std::time::Duration;
use tokio::time::Instant;

use receptionist::{ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider};

/// Run one completion, failing with `DomainError::Timeout` past `limit` or
/// past the turn `deadline`, whichever comes first
pub(crate) async fn complete_within(
    provider: &dyn LlmProvider,
    messages: &[ChatMessage],
    options: &CompletionOptions,
    limit: Duration,
    deadline: Instant,
) -> Result<CompletionResponse, DomainError> {
    let budget = limit.min(deadline.saturating_duration_since(Instant::now()));

    let response = tokio::time::timeout(budget, provider.complete(messages, options))
        .await
        .map_err(|_| DomainError::Timeout(budget.as_secs()))??;

    tracing::debug!(
        model = %response.model,
        finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        total_tokens = response.usage.total_tokens,
        "Completion received"
    );

    Ok(response)
}
