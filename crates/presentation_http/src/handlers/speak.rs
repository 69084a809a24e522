//! Speak handler
//!
//! The body is read as raw bytes so an empty body can be told apart from
//! malformed JSON: the former is a 400, the latter a 500 carrying the parser
//! message.

use axum::{Json, body::Bytes, extract::State};
use domain::{Prosody, SpeechRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Speak request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub pitch: Option<f32>,
}

/// Speak response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakResponse {
    pub status: String,
    pub text: String,
    /// Speed actually applied, after clamping
    pub speed: Prosody,
    /// Pitch actually applied, after clamping
    pub pitch: Prosody,
    /// Pending requests plus the one being spoken
    pub queue_size: usize,
    pub message: String,
}

/// Queue text for speaking
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn speak(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SpeakResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Empty request body".to_string()));
    }

    let payload: SpeakRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::Internal(e.to_string()))?;

    let request = SpeechRequest::new(
        payload.text.unwrap_or_default(),
        payload.speed.unwrap_or(Prosody::NEUTRAL.value()),
        payload.pitch.unwrap_or(Prosody::NEUTRAL.value()),
    )?;

    let accepted = state.orchestrator().submit(request)?;
    debug!(queue_size = accepted.queue_size, "Speech request queued");

    Ok(Json(SpeakResponse {
        status: "queued".to_string(),
        text: accepted.request.text().to_string(),
        speed: accepted.request.speed(),
        pitch: accepted.request.pitch(),
        queue_size: accepted.queue_size,
        message: "Text added to speech queue".to_string(),
    }))
}
