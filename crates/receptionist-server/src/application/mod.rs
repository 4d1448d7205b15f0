//! Application Layer (Use Cases)
//!
//! Sequences classification, persistence, alerting and reply generation
//! for each telephony webhook event.

mod call_log_service;
mod classifier;
mod llm_call;
mod notification_service;
mod reply_generator;
mod turn_orchestrator;

#[cfg(test)]
pub(crate) mod testing;

pub use call_log_service::{CallLogService, CallLogSnapshot};
pub use classifier::TranscriptClassifier;
pub use notification_service::{DispatchReport, NotificationService};
pub use reply_generator::ReplyGenerator;
pub use turn_orchestrator::{
    IncomingCall, SpeechTurn, TurnOrchestrator, TurnOutcome, SPEECH_CALLBACK_PATH,
};
