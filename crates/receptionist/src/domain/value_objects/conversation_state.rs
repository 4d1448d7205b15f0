//! ConversationState - Where a call stands between webhook turns

use serde::{Deserialize, Serialize};

/// Turn-taking state of a call.
///
/// Nothing is kept in memory between turns: the state after a turn is
/// implied by the last instruction of the rendered voice response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Incoming call, nothing spoken yet
    AwaitingFirstTurn,
    /// Greeting or reply spoken, telephony layer is gathering speech
    AwaitingSpeech,
    /// A speech turn is being classified and answered
    ProcessingTurn,
    /// Hangup issued; absorbing
    Terminated,
}

impl ConversationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationState::Terminated)
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationState::AwaitingFirstTurn => write!(f, "awaiting_first_turn"),
            ConversationState::AwaitingSpeech => write!(f, "awaiting_speech"),
            ConversationState::ProcessingTurn => write!(f, "processing_turn"),
            ConversationState::Terminated => write!(f, "terminated"),
        }
    }
}
