//! Infrastructure layer - Adapters for external systems
//!
//! Implements the synthesis and music ports defined in the application
//! layer, and provides configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, CommandEngineConfig, ConfigError, EngineKind, MusicConfig, ServerConfig,
    SimulatedEngineConfig, SpeechConfig,
};
pub use telemetry::{TelemetryError, init_tracing};
