//! Twilio webhook forms
//!
//! Twilio posts `application/x-www-form-urlencoded` bodies with PascalCase
//! keys and many more fields than these; unknown fields are ignored.

use serde::Deserialize;

use crate::application::{IncomingCall, SpeechTurn};

/// Initial call webhook
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitialCallForm {
    pub from: String,
    pub call_sid: String,
}

impl From<InitialCallForm> for IncomingCall {
    fn from(form: InitialCallForm) -> Self {
        Self {
            caller_number: form.from,
            call_sid: form.call_sid,
        }
    }
}

/// Speech-turn webhook (gather callback)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpeechTurnForm {
    #[serde(default)]
    pub speech_result: Option<String>,
    pub from: String,
    pub call_sid: String,
}

impl From<SpeechTurnForm> for SpeechTurn {
    fn from(form: SpeechTurnForm) -> Self {
        Self {
            transcript: form.speech_result,
            caller_number: form.from,
            call_sid: form.call_sid,
        }
    }
}

/// Call status callback
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallStatusForm {
    pub call_sid: String,
    #[serde(default)]
    pub call_status: Option<String>,
    /// Seconds; only sent once the call has completed
    #[serde(default)]
    pub call_duration: Option<u32>,
}

