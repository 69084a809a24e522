//! Simulated synthesis engine
//!
//! Produces no audio. Each utterance "plays" for a time proportional to its
//! length and inversely proportional to its speed, then reports completion
//! from a Tokio task. Used for development, demos and tests.

use std::time::Duration;

use application::error::ApplicationError;
use application::ports::{CompletionSink, SynthesisPort, Utterance};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::config::SimulatedEngineConfig;

/// Engine that only waits
pub struct SimulatedSynthesisEngine {
    config: SimulatedEngineConfig,
    init_delay: Duration,
    current: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for SimulatedSynthesisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedSynthesisEngine")
            .field("config", &self.config)
            .field("init_delay", &self.init_delay)
            .finish_non_exhaustive()
    }
}

impl SimulatedSynthesisEngine {
    #[must_use]
    pub fn new(config: SimulatedEngineConfig, init_delay: Duration) -> Self {
        Self {
            config,
            init_delay,
            current: Mutex::new(None),
        }
    }

    /// How long an utterance pretends to play
    #[must_use]
    pub fn duration_for(&self, utterance: &Utterance) -> Duration {
        let chars = u64::try_from(utterance.text.chars().count()).unwrap_or(u64::MAX);
        let base = Duration::from_millis(self.config.ms_per_char.saturating_mul(chars));
        base.div_f32(utterance.speed.value())
            .max(Duration::from_millis(self.config.min_duration_ms))
    }

    fn should_fail(&self, text: &str) -> bool {
        self.config
            .failure_marker
            .as_deref()
            .is_some_and(|marker| !marker.is_empty() && text.contains(marker))
    }
}

#[async_trait]
impl SynthesisPort for SimulatedSynthesisEngine {
    async fn initialize(&self) -> Result<(), ApplicationError> {
        if !self.init_delay.is_zero() {
            tokio::time::sleep(self.init_delay).await;
        }
        info!("Simulated TTS engine initialized");
        Ok(())
    }

    #[instrument(skip(self, utterance, completion), fields(utterance_id = %utterance.id, locale = %utterance.locale))]
    fn speak(
        &self,
        utterance: Utterance,
        completion: CompletionSink,
    ) -> Result<(), ApplicationError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ApplicationError::Internal(format!("No async runtime: {e}")))?;

        let duration = self.duration_for(&utterance);
        let fail = self.should_fail(&utterance.text);
        debug!(?duration, fail, "Simulating utterance");

        let handle = runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if fail {
                completion.failed(utterance.id, "Simulated synthesis failure");
            } else {
                completion.done(utterance.id);
            }
        });

        if let Some(previous) = self.current.lock().replace(handle) {
            previous.abort();
        }
        Ok(())
    }

    fn stop(&self) {
        if let Some(handle) = self.current.lock().take() {
            handle.abort();
            debug!("Simulated utterance abandoned");
        }
    }
}
