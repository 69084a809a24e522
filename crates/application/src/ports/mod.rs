//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod music_player_port;
mod synthesis_port;

#[cfg(test)]
pub use music_player_port::MockMusicPlayerPort;
pub use music_player_port::{MusicPlayerPort, MusicState};
#[cfg(test)]
pub use synthesis_port::MockSynthesisPort;
pub use synthesis_port::{CompletionSink, SpeakOutcome, SynthesisEvent, SynthesisPort, Utterance};
