//! Repository Ports
//!
//! Data access interfaces for domain entities.

mod call_log_repository;

pub use call_log_repository::*;
