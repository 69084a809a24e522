//! Read-only status snapshot
//!
//! The orchestrator publishes a fresh snapshot on every state transition.
//! Readers load the latest one without taking the orchestrator lock, so a
//! read may lag an in-flight transition.

use std::sync::Arc;

use arc_swap::ArcSwap;
use domain::MusicFocusState;
use serde::{Deserialize, Serialize};

/// Point-in-time view of the speech service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Whether the synthesis engine finished initializing
    pub tts_ready: bool,
    /// Whether an utterance is being synthesized
    pub is_speaking: bool,
    /// Requests waiting, excluding the one being spoken
    pub queue_depth: usize,
    /// Last human-readable status line
    pub last_status: String,
    /// Background music focus
    pub music_focus: MusicFocusState,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            tts_ready: false,
            is_speaking: false,
            queue_depth: 0,
            last_status: "Stopped".to_string(),
            music_focus: MusicFocusState::NotLoaded,
        }
    }
}

/// Lifecycle view for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub is_running: bool,
    pub last_status: String,
}

/// Single-writer, many-reader holder of the latest snapshot
#[derive(Debug)]
pub struct StatusBoard {
    current: ArcSwap<StatusSnapshot>,
}

impl StatusBoard {
    #[must_use]
    pub fn new(initial: StatusSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// Latest published snapshot
    #[must_use]
    pub fn load(&self) -> Arc<StatusSnapshot> {
        self.current.load_full()
    }

    /// Replace the snapshot
    pub fn publish(&self, snapshot: StatusSnapshot) {
        self.current.store(Arc::new(snapshot));
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new(StatusSnapshot::default())
    }
}
