//! Speech engine configuration.

use serde::{Deserialize, Serialize};

/// Which synthesis engine backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// In-process engine that only waits; useful without audio hardware
    #[default]
    Simulated,
    /// External TTS program, one process per utterance
    Command,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simulated => write!(f, "simulated"),
            Self::Command => write!(f, "command"),
        }
    }
}

/// Timing knobs for the simulated engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedEngineConfig {
    /// Milliseconds per character at 1x speed
    #[serde(default = "default_ms_per_char")]
    pub ms_per_char: u64,

    /// Lower bound for a single utterance
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Texts containing this marker fail instead of finishing
    #[serde(default)]
    pub failure_marker: Option<String>,
}

const fn default_ms_per_char() -> u64 {
    60
}

const fn default_min_duration_ms() -> u64 {
    250
}

impl Default for SimulatedEngineConfig {
    fn default() -> Self {
        Self {
            ms_per_char: default_ms_per_char(),
            min_duration_ms: default_min_duration_ms(),
            failure_marker: None,
        }
    }
}

/// External TTS program invocation
///
/// Each argument may contain the placeholders `{text}`, `{locale}`,
/// `{language}`, `{rate}` and `{pitch}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEngineConfig {
    /// Program to run
    #[serde(default = "default_program")]
    pub program: String,

    /// Argument template
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Words per minute at 1x speed, used to compute `{rate}`
    #[serde(default = "default_base_rate")]
    pub base_rate: u32,

    /// Pitch value at 1x, used to compute `{pitch}`
    #[serde(default = "default_base_pitch")]
    pub base_pitch: u32,
}

fn default_program() -> String {
    "espeak-ng".to_string()
}

fn default_args() -> Vec<String> {
    ["-v", "{language}", "-s", "{rate}", "-p", "{pitch}", "{text}"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_base_rate() -> u32 {
    175
}

const fn default_base_pitch() -> u32 {
    50
}

impl Default for CommandEngineConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            base_rate: default_base_rate(),
            base_pitch: default_base_pitch(),
        }
    }
}

/// Speech engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Engine selection
    #[serde(default)]
    pub engine: EngineKind,

    /// Artificial delay before the engine reports ready
    #[serde(default)]
    pub init_delay_ms: u64,

    #[serde(default)]
    pub simulated: SimulatedEngineConfig,

    #[serde(default)]
    pub command: CommandEngineConfig,
}
