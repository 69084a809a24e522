//! voxqueue HTTP presentation layer
//!
//! Exposes `POST /speak`, `GET /status` and `GET /health`. Handlers reach
//! the speech queue only through the orchestrator.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_app, create_router};
pub use state::AppState;
