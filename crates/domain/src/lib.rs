//! Domain layer for voxqueue
//!
//! Contains the speech request entity, the prosody and locale value objects,
//! and the state enums shared by the orchestrator and the audio focus
//! arbitrator. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
