//! Application layer - Use cases and orchestration
//!
//! Owns the speech queue, the orchestrator state machine, audio focus
//! arbitration and the service lifecycle. Talks to the synthesis engine and
//! the music player only through the ports defined here.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
