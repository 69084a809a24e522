//! Value Objects - Immutable, identity-less domain primitives

mod music_focus;
mod orchestrator_state;
mod prosody;
mod speech_locale;
mod utterance_id;

pub use music_focus::MusicFocusState;
pub use orchestrator_state::OrchestratorState;
pub use prosody::Prosody;
pub use speech_locale::SpeechLocale;
pub use utterance_id::UtteranceId;
