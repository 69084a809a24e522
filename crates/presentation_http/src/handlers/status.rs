//! Status handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Status response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub service: String,
    pub port: u16,
    pub tts_initialized: bool,
    pub is_speaking: bool,
    /// Pending requests, not counting the one being spoken
    pub queue_size: usize,
    pub last_status: String,
}

/// Current orchestrator snapshot plus the declared port
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = state.orchestrator().status();

    Json(StatusResponse {
        service: "running".to_string(),
        port: state.port(),
        tts_initialized: snapshot.tts_ready,
        is_speaking: snapshot.is_speaking,
        queue_size: snapshot.queue_depth,
        last_status: snapshot.last_status.clone(),
    })
}
