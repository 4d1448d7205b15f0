//! VoiceResponse - Instruction program for the telephony layer
//!
//! A response is an ordered list of `say`, `gather` and `hangup`
//! instructions. Rendering to a wire format (TwiML) happens in the
//! server's formatter adapter.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ConversationState;

/// Speech-gather settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gather {
    /// Callback path the telephony layer posts the transcript to
    pub action: String,
    pub method: String,
    /// Seconds of silence before giving up on input
    pub timeout_secs: u32,
    pub speech_timeout: String,
    pub language: String,
}

impl Gather {
    /// Speech gather posting back to `action`, with a 5 second silence timeout
    pub fn speech(action: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: "POST".to_string(),
            timeout_secs: 5,
            speech_timeout: "auto".to_string(),
            language: language.into(),
        }
    }
}

/// A single voice instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verb", rename_all = "lowercase")]
pub enum VoiceInstruction {
    Say {
        text: String,
        voice: Option<String>,
        language: Option<String>,
    },
    Gather(Gather),
    Hangup,
}

/// Ordered voice-response program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceResponse {
    instructions: Vec<VoiceInstruction>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Speak with the telephony layer's default voice
    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.instructions.push(VoiceInstruction::Say {
            text: text.into(),
            voice: None,
            language: None,
        });
        self
    }

    pub fn say_with_voice(
        mut self,
        text: impl Into<String>,
        voice: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        self.instructions.push(VoiceInstruction::Say {
            text: text.into(),
            voice: Some(voice.into()),
            language: Some(language.into()),
        });
        self
    }

    pub fn gather(mut self, gather: Gather) -> Self {
        self.instructions.push(VoiceInstruction::Gather(gather));
        self
    }

    pub fn hangup(mut self) -> Self {
        self.instructions.push(VoiceInstruction::Hangup);
        self
    }

    pub fn instructions(&self) -> &[VoiceInstruction] {
        &self.instructions
    }

    pub fn last(&self) -> Option<&VoiceInstruction> {
        self.instructions.last()
    }

    pub fn ends_with_hangup(&self) -> bool {
        matches!(self.last(), Some(VoiceInstruction::Hangup))
    }

    /// State the call is left in once the program has been played.
    ///
    /// A gather hands control back on speech, so any instructions after it
    /// only run when no input arrives.
    pub fn next_state(&self) -> ConversationState {
        let gathers = self
            .instructions
            .iter()
            .any(|i| matches!(i, VoiceInstruction::Gather(_)));

        if gathers {
            ConversationState::AwaitingSpeech
        } else {
            ConversationState::Terminated
        }
    }
}
