//! Application state shared across handlers

use std::sync::Arc;

use application::{SpeechOrchestrator, SpeechService};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Speech service owning the orchestrator
    pub speech: Arc<SpeechService>,
}

impl AppState {
    #[must_use]
    pub const fn new(speech: Arc<SpeechService>) -> Self {
        Self { speech }
    }

    /// The orchestrator; the only way handlers reach the queue
    #[must_use]
    pub fn orchestrator(&self) -> &SpeechOrchestrator {
        self.speech.orchestrator()
    }

    /// Port announced in status responses
    #[must_use]
    pub fn port(&self) -> u16 {
        self.speech.port()
    }
}
