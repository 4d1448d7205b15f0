//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - CallAnalysis: Classifier verdict for one speech turn
//! - CallRecord: Persisted log entry for a processed turn
//! - CallLog: Bounded, most-recent-first collection of records
//! - NotificationPayload: Alert content for important calls
//! - VoiceResponse: Instruction program returned to the telephony layer

mod analysis;
mod call_log;
mod call_record;
mod notification;
mod voice;

pub use analysis::*;
pub use call_log::*;
pub use call_record::*;
pub use notification::*;
pub use voice::*;
