//! Receptionist API Routes
//!
//! - /api/twilio - Telephony webhooks (TwiML responses)
//! - /api/call-logs - Dashboard query (JSON)

pub mod call_logs;
pub mod swagger;
pub mod twilio;
