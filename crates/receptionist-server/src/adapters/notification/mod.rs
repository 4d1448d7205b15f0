//! Notification Channels
//!
//! Outbound alert channels for important calls.

mod email;
mod whatsapp;

pub use email::EmailChannel;
pub use whatsapp::WhatsAppChannel;
