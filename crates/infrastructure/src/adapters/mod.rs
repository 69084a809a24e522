//! Adapters - Implementations of application ports

mod command_synthesis;
mod playlist_player;
mod simulated_synthesis;

use std::sync::Arc;
use std::time::Duration;

use application::ports::SynthesisPort;

pub use command_synthesis::CommandSynthesisEngine;
pub use playlist_player::{AUDIO_EXTENSIONS, PlaylistMusicPlayer, is_audio_file};
pub use simulated_synthesis::SimulatedSynthesisEngine;

use crate::config::{EngineKind, SpeechConfig};

/// Build the synthesis engine selected in the configuration
#[must_use]
pub fn build_synthesis_engine(config: &SpeechConfig) -> Arc<dyn SynthesisPort> {
    match config.engine {
        EngineKind::Simulated => Arc::new(SimulatedSynthesisEngine::new(
            config.simulated.clone(),
            Duration::from_millis(config.init_delay_ms),
        )),
        EngineKind::Command => Arc::new(CommandSynthesisEngine::new(config.command.clone())),
    }
}
