//! Call Log Repository Implementations

mod json_file;
mod memory;

pub use json_file::JsonFileCallLogRepository;
pub use memory::InMemoryCallLogRepository;
