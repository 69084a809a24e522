//! HTTP request handlers

pub mod health;
pub mod speak;
pub mod status;

use crate::error::ApiError;

/// Fallback for unknown paths and unsupported methods
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
