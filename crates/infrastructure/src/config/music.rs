//! Background music configuration.

use serde::{Deserialize, Serialize};

/// Background music configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicConfig {
    /// Tracks loaded at startup; non-audio entries are skipped
    #[serde(default)]
    pub playlist: Vec<String>,

    /// Initial volume in `[0.0, 1.0]`
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Start playing the playlist right after loading it
    #[serde(default)]
    pub autoplay: bool,
}

const fn default_volume() -> f32 {
    0.5
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            playlist: Vec::new(),
            volume: default_volume(),
            autoplay: false,
        }
    }
}
