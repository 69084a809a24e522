//! Speech orchestrator state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an utterance is currently being synthesized
///
/// `Idle -> Speaking` is taken only when an utterance is dequeued;
/// `Speaking -> Idle` only when its completion (or failure) is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrchestratorState {
    #[default]
    Idle,
    Speaking,
}

impl OrchestratorState {
    #[must_use]
    pub const fn is_speaking(self) -> bool {
        matches!(self, Self::Speaking)
    }
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Speaking => write!(f, "speaking"),
        }
    }
}
