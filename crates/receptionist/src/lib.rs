//! Receptionist Domain Library
//!
//! Core domain types and interfaces for an AI receptionist that answers
//! phone calls on behalf of a single owner.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (CallRecord, CallLog, CallAnalysis, VoiceResponse)
//!   - `value_objects/`: Immutable value types (Sentiment, CallStatus, ConversationState)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Call log persistence
//!   - `services/`: Language model and notification channel interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use receptionist::domain::{CallAnalysis, CallRecord, VoiceResponse};
//! use receptionist::ports::{CallLogRepository, LlmProvider};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CallAnalysis, CallLog, CallRecord, CallStats, CallStatus, ConversationState, DomainError,
    Gather, NewCallRecord, NotificationPayload, Sentiment, VoiceInstruction, VoiceResponse,
    CALL_LOG_CAPACITY, DEFAULT_QUERY_LIMIT,
};
pub use ports::{
    CallLogRepository, ChatMessage, CompletionOptions, CompletionResponse, LlmProvider,
    MessageRole, NotificationChannel, ResponseFormat, TokenUsage,
};
