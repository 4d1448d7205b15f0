//! Value Objects
//!
//! Immutable types that describe a call without identity of their own.

mod call_status;
mod conversation_state;
mod sentiment;

pub use call_status::*;
pub use conversation_state::*;
pub use sentiment::*;
