//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// The request carried no text to speak
    #[error("Missing 'text' field")]
    MissingText,

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
