//! Speech orchestrator
//!
//! Serializes speech requests into a single-consumer queue and drives the
//! synthesis engine one utterance at a time, ducking background music around
//! each utterance.
//!
//! # Consistency domain
//!
//! The orchestrator state, the queue, the music focus and the in-flight
//! utterance live behind one mutex. Every transition (enqueue, advance,
//! completion, user music control) takes that lock once, so two concurrent
//! `try_advance` calls can never both dequeue, and a user stop issued during
//! speech is seen by the resume that follows.
//!
//! Engine completion signals arrive as messages on a channel (see
//! [`CompletionSink`]) and are applied by [`SpeechOrchestrator::on_speak_complete`],
//! never by the engine mutating state directly.
//!
//! Readiness is scoped to a [`Session`]: attaching a completion channel opens
//! one and [`SpeechOrchestrator::reset`] closes it, so an initialization that
//! finishes after a reset cannot mark the engine ready.

use std::sync::Arc;

use domain::{
    MusicFocusState, OrchestratorState, Prosody, SpeechLocale, SpeechRequest, UtteranceId,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{
    CompletionSink, MusicPlayerPort, MusicState, SpeakOutcome, SynthesisEvent, SynthesisPort,
    Utterance,
};
use crate::services::audio_focus::AudioFocusArbitrator;
use crate::services::speech_queue::SpeechQueue;
use crate::services::status::{StatusBoard, StatusSnapshot};

/// Result of accepting a request
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    /// The request as it will be spoken (prosody already clamped)
    pub request: SpeechRequest,
    /// Pending requests plus the one being spoken, if any
    pub queue_size: usize,
}

/// One attach/reset cycle of the orchestrator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session(u64);

impl Session {
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug)]
struct InFlight {
    id: UtteranceId,
    locale: SpeechLocale,
    preview: String,
}

#[derive(Debug)]
struct Core {
    state: OrchestratorState,
    session: Session,
    engine_ready: bool,
    queue: SpeechQueue,
    focus: AudioFocusArbitrator,
    in_flight: Option<InFlight>,
    completion: Option<CompletionSink>,
    last_status: String,
}

impl Core {
    fn occupancy(&self) -> usize {
        self.queue.depth() + usize::from(self.state.is_speaking())
    }

    fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            tts_ready: self.engine_ready,
            is_speaking: self.state.is_speaking(),
            queue_depth: self.queue.depth(),
            last_status: self.last_status.clone(),
            music_focus: self.focus.focus(),
        }
    }
}

/// The speech state machine
pub struct SpeechOrchestrator {
    engine: Arc<dyn SynthesisPort>,
    core: Mutex<Core>,
    status: StatusBoard,
}

impl std::fmt::Debug for SpeechOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechOrchestrator")
            .field("engine", &"<SynthesisPort>")
            .field("status", &self.status.load())
            .finish_non_exhaustive()
    }
}

impl SpeechOrchestrator {
    /// Create an idle orchestrator
    ///
    /// It accepts nothing until a completion channel is attached and the
    /// engine is marked ready.
    #[must_use]
    pub fn new(engine: Arc<dyn SynthesisPort>, music: Arc<dyn MusicPlayerPort>) -> Self {
        let core = Core {
            state: OrchestratorState::Idle,
            session: Session::default(),
            engine_ready: false,
            queue: SpeechQueue::new(),
            focus: AudioFocusArbitrator::new(music),
            in_flight: None,
            completion: None,
            last_status: "Stopped".to_string(),
        };
        let status = StatusBoard::new(core.snapshot());

        Self {
            engine,
            core: Mutex::new(core),
            status,
        }
    }

    /// Open a new session with a fresh completion channel
    ///
    /// The caller must feed every received event to
    /// [`on_speak_complete`](Self::on_speak_complete) and report the engine
    /// initialization result against the returned session.
    pub fn attach_completion(&self) -> (Session, mpsc::UnboundedReceiver<SynthesisEvent>) {
        let (sink, rx) = CompletionSink::channel();
        let mut core = self.core.lock();
        core.session = core.session.next();
        core.completion = Some(sink);
        (core.session, rx)
    }

    /// Accept a request: enqueue it and try to start speaking
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotReady` without enqueueing if the engine
    /// has not finished initializing.
    #[instrument(skip(self, request), fields(text_len = request.text().len()))]
    pub fn submit(&self, request: SpeechRequest) -> Result<Accepted, ApplicationError> {
        let mut core = self.core.lock();
        if !core.engine_ready {
            return Err(ApplicationError::NotReady);
        }

        core.queue.enqueue(request.clone());
        debug!(
            speed = %request.speed(),
            pitch = %request.pitch(),
            queue_depth = core.queue.depth(),
            "Added to speech queue"
        );

        self.advance_locked(&mut core);
        let queue_size = core.occupancy();
        self.publish(&core);

        Ok(Accepted {
            request,
            queue_size,
        })
    }

    /// Start the next utterance if idle, ready and something is queued
    ///
    /// A no-op when any precondition fails; safe to call redundantly and
    /// concurrently.
    pub fn try_advance(&self) {
        let mut core = self.core.lock();
        self.advance_locked(&mut core);
        self.publish(&core);
    }

    /// Apply an engine completion signal
    ///
    /// Either outcome returns the orchestrator to `Idle`, resumes ducked
    /// music and moves on to the next request. A failed request is dropped,
    /// never retried. Signals for anything but the in-flight utterance are
    /// ignored.
    pub fn on_speak_complete(&self, utterance_id: UtteranceId, outcome: SpeakOutcome) {
        let mut core = self.core.lock();
        match &core.in_flight {
            Some(current) if current.id == utterance_id => {},
            _ => {
                warn!(%utterance_id, "Ignoring completion for an utterance that is not in flight");
                return;
            },
        }

        Self::finish_locked(&mut core, outcome);
        self.advance_locked(&mut core);
        self.publish(&core);
    }

    /// Engine finished initializing; drain anything already queued
    ///
    /// Ignored when `session` is no longer current.
    pub fn mark_ready(&self, session: Session) {
        let mut core = self.core.lock();
        if core.session != session {
            debug!("Ignoring readiness from a closed session");
            return;
        }
        core.engine_ready = true;
        info!("TTS engine ready");
        self.advance_locked(&mut core);
        self.publish(&core);
    }

    /// Engine could not be initialized; new requests keep getting refused
    pub fn mark_unavailable(&self, session: Session, reason: &str) {
        let mut core = self.core.lock();
        if core.session != session {
            debug!("Ignoring initialization failure from a closed session");
            return;
        }
        core.engine_ready = false;
        core.last_status = format!("Error: TTS initialization failed: {reason}");
        self.publish(&core);
    }

    /// Overwrite the human-readable status line
    pub fn set_last_status(&self, status: impl Into<String>) {
        let mut core = self.core.lock();
        core.last_status = status.into();
        self.publish(&core);
    }

    /// Return to the initial state, discarding the queue and abandoning the
    /// in-flight utterance; returns the number of discarded requests
    pub fn reset(&self) -> usize {
        let mut core = self.core.lock();
        let discarded = core.queue.clear();
        core.state = OrchestratorState::Idle;
        core.session = core.session.next();
        core.engine_ready = false;
        core.in_flight = None;
        core.completion = None;
        core.focus.release();
        core.last_status = "Stopped".to_string();
        self.publish(&core);
        discarded
    }

    /// Latest status snapshot, read without taking the orchestrator lock
    #[must_use]
    pub fn status(&self) -> Arc<StatusSnapshot> {
        self.status.load()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status.load().tts_ready
    }

    // ------------------------------------------------------------------
    // Music controls
    // ------------------------------------------------------------------

    /// Replace the background playlist
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::MusicPlayer` when no track is playable.
    pub fn load_music(&self, tracks: Vec<String>) -> Result<usize, ApplicationError> {
        let mut core = self.core.lock();
        let loaded = core.focus.load(tracks)?;
        core.last_status = format!("Playlist loaded: {loaded} tracks");
        self.publish(&core);
        Ok(loaded)
    }

    pub fn play_music(&self) {
        self.music_command(|focus| {
            focus.play();
            format!("Playing: {}", track_label(focus))
        });
    }

    pub fn pause_music(&self) {
        self.music_command(|focus| {
            focus.pause();
            "Music paused".to_string()
        });
    }

    pub fn stop_music(&self) {
        self.music_command(|focus| {
            focus.stop();
            "Music stopped".to_string()
        });
    }

    pub fn next_track(&self) {
        self.music_command(|focus| {
            focus.next_track();
            format!("Next: {}", track_label(focus))
        });
    }

    pub fn previous_track(&self) {
        self.music_command(|focus| {
            focus.previous_track();
            format!("Previous: {}", track_label(focus))
        });
    }

    pub fn set_music_volume(&self, volume: f32) {
        let core = self.core.lock();
        core.focus.set_volume(volume);
        debug!(volume, "Music volume set");
    }

    #[must_use]
    pub fn music_state(&self) -> MusicState {
        self.core.lock().focus.music_state()
    }

    #[must_use]
    pub fn music_focus(&self) -> MusicFocusState {
        self.core.lock().focus.focus()
    }

    fn music_command(&self, command: impl FnOnce(&mut AudioFocusArbitrator) -> String) {
        let mut core = self.core.lock();
        let status = command(&mut core.focus);
        core.last_status = status;
        self.publish(&core);
    }

    // ------------------------------------------------------------------
    // Transitions; all run with the core lock held
    // ------------------------------------------------------------------

    fn advance_locked(&self, core: &mut Core) {
        loop {
            if core.state.is_speaking() || !core.engine_ready {
                return;
            }
            let Some(completion) = core.completion.clone() else {
                return;
            };
            let Some(request) = core.queue.try_dequeue() else {
                return;
            };

            core.state = OrchestratorState::Speaking;
            match self.begin_speak(core, &request, completion) {
                Ok(()) => return,
                Err(reason) => Self::finish_locked(core, SpeakOutcome::Failed(reason)),
            }
        }
    }

    fn begin_speak(
        &self,
        core: &mut Core,
        request: &SpeechRequest,
        completion: CompletionSink,
    ) -> Result<(), String> {
        core.focus.duck_for_speech();

        let locale = SpeechLocale::detect(request.text());
        let utterance = Utterance {
            id: UtteranceId::new(),
            text: request.text().to_string(),
            speed: Prosody::clamped(request.speed().value()),
            pitch: Prosody::clamped(request.pitch().value()),
            locale,
        };
        let id = utterance.id;
        let speed = utterance.speed;

        core.in_flight = Some(InFlight {
            id,
            locale,
            preview: request.preview(),
        });

        self.engine
            .speak(utterance, completion)
            .map_err(|e| match e {
                ApplicationError::Synthesis(reason) => reason,
                other => other.to_string(),
            })?;

        core.last_status = format!("Speaking ({}) at {speed} speed", locale.display_name());
        info!(
            utterance_id = %id,
            locale = %locale,
            speed = %speed,
            pitch = %request.pitch(),
            queue_depth = core.queue.depth(),
            "Speaking: {}",
            request.preview()
        );
        Ok(())
    }

    fn finish_locked(core: &mut Core, outcome: SpeakOutcome) {
        let finished = core.in_flight.take();
        core.state = OrchestratorState::Idle;
        core.focus.resume_after_speech();

        match outcome {
            SpeakOutcome::Done => {
                if let Some(f) = &finished {
                    debug!(utterance_id = %f.id, locale = %f.locale, "Finished: {}", f.preview);
                }
                core.last_status = "Finished speaking".to_string();
            },
            SpeakOutcome::Failed(reason) => {
                warn!(
                    utterance_id = ?finished.as_ref().map(|f| f.id),
                    %reason,
                    "Speech failed, skipping request"
                );
                core.last_status = format!("Error: {reason}");
            },
        }
    }

    fn publish(&self, core: &Core) {
        self.status.publish(core.snapshot());
    }
}

fn track_label(focus: &AudioFocusArbitrator) -> String {
    focus
        .current_track()
        .unwrap_or_else(|| "No music loaded".to_string())
}
