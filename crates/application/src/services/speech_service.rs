//! Speech service lifecycle
//!
//! Owns the orchestrator for the lifetime of the process and exposes the
//! start/stop hooks used by the entry point. Starting spawns two tasks: the
//! completion pump, which feeds engine signals into the orchestrator, and the
//! engine initialization. Stopping aborts both and discards the queue.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::ports::{MusicPlayerPort, SynthesisPort};
use crate::services::speech_orchestrator::SpeechOrchestrator;
use crate::services::status::ServiceStatus;

#[derive(Debug)]
struct ServiceTasks {
    completion_pump: JoinHandle<()>,
    initialization: JoinHandle<()>,
}

impl ServiceTasks {
    fn abort(self) {
        self.completion_pump.abort();
        self.initialization.abort();
    }
}

/// Start/stop wrapper around the speech orchestrator
pub struct SpeechService {
    orchestrator: Arc<SpeechOrchestrator>,
    engine: Arc<dyn SynthesisPort>,
    port: u16,
    running: AtomicBool,
    tasks: Mutex<Option<ServiceTasks>>,
}

impl std::fmt::Debug for SpeechService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechService")
            .field("orchestrator", &self.orchestrator)
            .field("engine", &"<SynthesisPort>")
            .field("port", &self.port)
            .field("running", &self.running.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl SpeechService {
    /// Create a stopped service
    ///
    /// `port` is the HTTP port the service is announced on.
    #[must_use]
    pub fn new(
        engine: Arc<dyn SynthesisPort>,
        music: Arc<dyn MusicPlayerPort>,
        port: u16,
    ) -> Self {
        let orchestrator = Arc::new(SpeechOrchestrator::new(Arc::clone(&engine), music));
        Self {
            orchestrator,
            engine,
            port,
            running: AtomicBool::new(false),
            tasks: Mutex::new(None),
        }
    }

    /// The orchestrator, for handlers and the presentation layer
    #[must_use]
    pub fn orchestrator(&self) -> &Arc<SpeechOrchestrator> {
        &self.orchestrator
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start the completion pump and initialize the engine
    ///
    /// Returns immediately; requests are refused until initialization
    /// completes. Calling `start` on a running service does nothing.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Speech service already running");
            return;
        }

        let (session, mut events) = self.orchestrator.attach_completion();
        let orchestrator = Arc::clone(&self.orchestrator);
        let completion_pump = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                orchestrator.on_speak_complete(event.utterance_id, event.outcome);
            }
        });

        self.orchestrator
            .set_last_status(format!("Running on port {}", self.port));

        let engine = Arc::clone(&self.engine);
        let orchestrator = Arc::clone(&self.orchestrator);
        let initialization = tokio::spawn(async move {
            match engine.initialize().await {
                Ok(()) => orchestrator.mark_ready(session),
                Err(e) => {
                    error!(error = %e, "TTS initialization failed");
                    orchestrator.mark_unavailable(session, &e.to_string());
                },
            }
        });

        *self.tasks.lock() = Some(ServiceTasks {
            completion_pump,
            initialization,
        });
        info!(port = self.port, "Speech service started");
    }

    /// Stop the service, abandoning the in-flight utterance and discarding
    /// everything queued
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }

        if let Some(tasks) = self.tasks.lock().take() {
            tasks.abort();
        }
        self.engine.stop();
        let discarded = self.orchestrator.reset();

        info!(discarded, "Speech service stopped");
    }

    /// Lifecycle view for the presentation layer
    #[must_use]
    pub fn service_status(&self) -> ServiceStatus {
        ServiceStatus {
            is_running: self.is_running(),
            last_status: self.orchestrator.status().last_status.clone(),
        }
    }
}
