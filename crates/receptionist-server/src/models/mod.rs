//! Receptionist Data Models
//!
//! - Twilio: webhook form payloads
//! - CallLogs: dashboard query response

mod call_logs;
mod twilio;

pub use call_logs::*;
pub use twilio::*;
