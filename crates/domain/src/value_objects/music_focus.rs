//! Background music focus state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Audio focus of the background music stream
///
/// `DuckedForSpeech` is distinct from `Stopped`: it records that the music
/// was paused by the arbitrator rather than by the user, so it is the only
/// state from which music is resumed after speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MusicFocusState {
    /// No track is loaded
    #[default]
    NotLoaded,
    /// A track is loaded but not playing (stopped or paused by the user)
    Stopped,
    /// Music is audible
    Playing,
    /// Paused by the arbitrator while speech is rendered
    DuckedForSpeech,
}

impl MusicFocusState {
    /// Derive the focus state from what the player reports
    #[must_use]
    pub const fn observed(loaded: bool, playing: bool) -> Self {
        match (loaded, playing) {
            (_, true) => Self::Playing,
            (true, false) => Self::Stopped,
            (false, false) => Self::NotLoaded,
        }
    }

    #[must_use]
    pub const fn is_ducked(self) -> bool {
        matches!(self, Self::DuckedForSpeech)
    }
}

impl fmt::Display for MusicFocusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotLoaded => "not_loaded",
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::DuckedForSpeech => "ducked_for_speech",
        };
        f.write_str(s)
    }
}
