//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The synthesis engine has not finished initializing
    #[error("TTS engine not initialized yet")]
    NotReady,

    /// Synthesis engine error
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Music player error
    #[error("Music player error: {0}")]
    MusicPlayer(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
