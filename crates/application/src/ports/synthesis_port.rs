//! Synthesis port - Interface to the text-to-speech engine
//!
//! The engine speaks one utterance at a time. `speak` only starts the
//! utterance; the outcome arrives later, on whatever task or thread the
//! engine chooses, through the [`CompletionSink`] handed to it.

use async_trait::async_trait;
use domain::{Prosody, SpeechLocale, UtteranceId};
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::ApplicationError;

/// Everything the engine needs to render one utterance
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Correlation token echoed back in the completion signal
    pub id: UtteranceId,
    /// Text to speak
    pub text: String,
    /// Speech rate multiplier
    pub speed: Prosody,
    /// Pitch multiplier
    pub pitch: Prosody,
    /// Voice language
    pub locale: SpeechLocale,
}

/// How an utterance ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakOutcome {
    Done,
    Failed(String),
}

/// Completion signal delivered by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisEvent {
    pub utterance_id: UtteranceId,
    pub outcome: SpeakOutcome,
}

/// Sending half of the engine completion channel
///
/// Cheap to clone; engines may move it into their own tasks. Signals sent
/// after the service stopped are dropped.
#[derive(Debug, Clone)]
pub struct CompletionSink {
    tx: mpsc::UnboundedSender<SynthesisEvent>,
}

impl CompletionSink {
    /// Create a sink together with the receiver the orchestrator drains
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SynthesisEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Report that the utterance finished
    pub fn done(&self, utterance_id: UtteranceId) {
        self.send(SynthesisEvent {
            utterance_id,
            outcome: SpeakOutcome::Done,
        });
    }

    /// Report that the utterance could not be rendered
    pub fn failed(&self, utterance_id: UtteranceId, reason: impl Into<String>) {
        self.send(SynthesisEvent {
            utterance_id,
            outcome: SpeakOutcome::Failed(reason.into()),
        });
    }

    fn send(&self, event: SynthesisEvent) {
        if self.tx.send(event).is_err() {
            debug!("Completion signal dropped, orchestrator is no longer listening");
        }
    }
}

/// Port for the speech synthesis engine
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SynthesisPort: Send + Sync {
    /// Bring the engine up; resolves once it can accept utterances
    async fn initialize(&self) -> Result<(), ApplicationError>;

    /// Start speaking an utterance without waiting for it to finish
    ///
    /// Must not block and must not call back into the orchestrator
    /// synchronously. The outcome is reported through `completion`.
    ///
    /// # Errors
    ///
    /// Returns an error if the utterance is rejected outright (e.g. the
    /// locale has no installed voice). No completion signal follows.
    fn speak(
        &self,
        utterance: Utterance,
        completion: CompletionSink,
    ) -> Result<(), ApplicationError>;

    /// Abandon whatever is being spoken
    fn stop(&self);
}
