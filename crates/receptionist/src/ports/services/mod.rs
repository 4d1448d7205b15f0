//! Service Ports
//!
//! Interfaces for external services: the language model used for
//! classification and replies, and the owner's notification channels.

pub mod llm_provider;
pub mod notification_channel;

pub use llm_provider::*;
pub use notification_channel::*;
