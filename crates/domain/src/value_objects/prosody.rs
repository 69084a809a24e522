//! Prosody value object
//!
//! Represents a speech rate or pitch multiplier accepted by the synthesis
//! engine (0.5x - 2.0x).
//!
//! Out-of-range values are never rejected, they are clamped. Clamping is
//! applied both at the HTTP boundary and again right before an utterance is
//! handed to the engine, so internal callers get the same guarantee.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Prosody;
//!
//! assert!((Prosody::clamped(9.9).value() - 2.0).abs() < f32::EPSILON);
//! assert!((Prosody::clamped(0.1).value() - 0.5).abs() < f32::EPSILON);
//! assert!((Prosody::clamped(1.25).value() - 1.25).abs() < f32::EPSILON);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A speech rate or pitch multiplier, always within `[MIN, MAX]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Prosody(f32);

impl Prosody {
    /// Slowest / lowest multiplier the engine accepts
    pub const MIN: f32 = 0.5;

    /// Fastest / highest multiplier the engine accepts
    pub const MAX: f32 = 2.0;

    /// The engine's natural rate and pitch
    pub const NEUTRAL: Self = Self(1.0);

    /// Create a prosody value, clamping to the valid range
    ///
    /// `NaN` has no meaningful position in the range and maps to
    /// [`Prosody::NEUTRAL`]. Infinities clamp to the nearest bound.
    #[must_use]
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            Self::NEUTRAL
        } else {
            Self(value.clamp(Self::MIN, Self::MAX))
        }
    }

    /// Get the multiplier
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Check whether this is the engine's natural setting
    #[must_use]
    pub fn is_neutral(self) -> bool {
        (self.0 - Self::NEUTRAL.0).abs() < f32::EPSILON
    }
}

impl Default for Prosody {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<f32> for Prosody {
    fn from(value: f32) -> Self {
        Self::clamped(value)
    }
}

impl From<Prosody> for f32 {
    fn from(prosody: Prosody) -> Self {
        prosody.0
    }
}

impl fmt::Display for Prosody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}
