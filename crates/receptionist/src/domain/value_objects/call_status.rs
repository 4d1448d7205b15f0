//! CallStatus - Lifecycle marker stored on each call record

use serde::{Deserialize, Serialize};

/// Status of a persisted call record.
///
/// Records are only ever written once a speech turn has been processed,
/// so `Completed` is the only state observed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    #[default]
    Completed,
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallStatus::Completed => write!(f, "completed"),
        }
    }
}
