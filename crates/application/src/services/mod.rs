//! Application services - Use case implementations

mod audio_focus;
mod speech_orchestrator;
mod speech_queue;
mod speech_service;
mod status;

pub use audio_focus::AudioFocusArbitrator;
pub use speech_orchestrator::{Accepted, Session, SpeechOrchestrator};
pub use speech_queue::SpeechQueue;
pub use speech_service::SpeechService;
pub use status::{ServiceStatus, StatusBoard, StatusSnapshot};
