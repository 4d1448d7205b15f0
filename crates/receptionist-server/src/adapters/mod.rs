//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod formatters;
pub mod notification;
pub mod openai;
pub mod storage;

// Re-exports
pub use notification::{EmailChannel, WhatsAppChannel};
pub use openai::OpenAiProvider;
pub use storage::{InMemoryCallLogRepository, JsonFileCallLogRepository};
