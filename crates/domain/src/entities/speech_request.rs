//! Speech request entity
//!
//! A single utterance waiting to be spoken. Created once from a validated
//! inbound request, consumed exactly once by the orchestrator, never mutated.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Prosody, SpeechLocale};

/// Number of characters shown when a request is logged or reported
const PREVIEW_CHARS: usize = 25;

/// An immutable request to speak some text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpeechRequest")]
pub struct SpeechRequest {
    text: String,
    speed: Prosody,
    pitch: Prosody,
}

/// Unvalidated wire form; deserialization goes through [`SpeechRequest::new`]
#[derive(Deserialize)]
struct RawSpeechRequest {
    text: String,
    #[serde(default)]
    speed: Prosody,
    #[serde(default)]
    pitch: Prosody,
}

impl TryFrom<RawSpeechRequest> for SpeechRequest {
    type Error = DomainError;

    fn try_from(raw: RawSpeechRequest) -> Result<Self, Self::Error> {
        Self::new(raw.text, raw.speed, raw.pitch)
    }
}

impl SpeechRequest {
    /// Create a new speech request
    ///
    /// Speed and pitch are clamped to the engine's range rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingText` if `text` is empty.
    pub fn new(
        text: impl Into<String>,
        speed: impl Into<Prosody>,
        pitch: impl Into<Prosody>,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        if text.is_empty() {
            return Err(DomainError::MissingText);
        }

        Ok(Self {
            text,
            speed: speed.into(),
            pitch: pitch.into(),
        })
    }

    /// Create a request with neutral speed and pitch
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingText` if `text` is empty.
    pub fn with_defaults(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(text, Prosody::NEUTRAL, Prosody::NEUTRAL)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn speed(&self) -> Prosody {
        self.speed
    }

    #[must_use]
    pub const fn pitch(&self) -> Prosody {
        self.pitch
    }

    /// Voice language selected from the text's script
    #[must_use]
    pub fn locale(&self) -> SpeechLocale {
        SpeechLocale::detect(&self.text)
    }

    /// Leading characters of the text, for logs and status lines
    #[must_use]
    pub fn preview(&self) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}
