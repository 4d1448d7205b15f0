//! CallAnalysis - Classifier verdict for a transcript
//!
//! Ephemeral: produced per turn and consumed immediately.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Sentiment;

/// Caller name used whenever the classifier could not extract one
pub const UNKNOWN_CALLER: &str = "Unknown";

/// Structured result of classifying a call transcript.
///
/// The field names match the JSON contract the language model is asked to
/// produce, so a provider response deserializes straight into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAnalysis {
    pub is_important: bool,
    pub topic: String,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub caller_name: Option<String>,
    pub summary: String,
    pub should_continue: bool,
}

impl CallAnalysis {
    /// Verdict used when classification is unavailable or failed
    pub fn fallback() -> Self {
        Self {
            is_important: false,
            topic: "Unable to analyze".to_string(),
            sentiment: Sentiment::Neutral,
            caller_name: None,
            summary: "Call analysis failed".to_string(),
            should_continue: false,
        }
    }

    /// Caller name for display, `"Unknown"` when not extracted
    pub fn caller_display_name(&self) -> &str {
        self.caller_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_CALLER)
    }
}
