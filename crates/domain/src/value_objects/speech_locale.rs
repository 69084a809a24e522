//! Speech locale classification
//!
//! Chooses the voice language for an utterance by inspecting its script.
//! Any code point in the Thai block (U+0E00..U+0E7F) selects Thai; everything
//! else is spoken with the default English voice.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Voice language used for an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechLocale {
    /// Thai (th-TH)
    Thai,
    /// US English (en-US), the fallback
    #[default]
    English,
}

impl SpeechLocale {
    /// Classify text by script membership
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::value_objects::SpeechLocale;
    ///
    /// assert_eq!(SpeechLocale::detect("สวัสดี"), SpeechLocale::Thai);
    /// assert_eq!(SpeechLocale::detect("Hello"), SpeechLocale::English);
    /// ```
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.chars().any(Self::is_thai) {
            Self::Thai
        } else {
            Self::English
        }
    }

    const fn is_thai(c: char) -> bool {
        matches!(c, '\u{0E00}'..='\u{0E7F}')
    }

    /// BCP 47 language tag
    #[must_use]
    pub const fn language_tag(self) -> &'static str {
        match self {
            Self::Thai => "th-TH",
            Self::English => "en-US",
        }
    }

    /// ISO 639-1 language code
    #[must_use]
    pub const fn language(self) -> &'static str {
        match self {
            Self::Thai => "th",
            Self::English => "en",
        }
    }

    /// Human-readable language name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Thai => "Thai",
            Self::English => "English",
        }
    }
}

impl fmt::Display for SpeechLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thai_text_selects_thai() {
        assert_eq!(SpeechLocale::detect("สวัสดี"), SpeechLocale::Thai);
    }

    #[test]
    fn latin_text_selects_english() {
        assert_eq!(SpeechLocale::detect("Hello world"), SpeechLocale::English);
    }

    #[test]
    fn single_thai_character_in_mixed_text_selects_thai() {
        assert_eq!(
            SpeechLocale::detect("Order 42 is ready ค่ะ"),
            SpeechLocale::Thai
        );
    }

    #[test]
    fn block_boundaries_are_inclusive() {
        assert_eq!(SpeechLocale::detect("\u{0E00}"), SpeechLocale::Thai);
        assert_eq!(SpeechLocale::detect("\u{0E7F}"), SpeechLocale::Thai);
        assert_eq!(SpeechLocale::detect("\u{0DFF}"), SpeechLocale::English);
        assert_eq!(SpeechLocale::detect("\u{0E80}"), SpeechLocale::English);
    }

    #[test]
    fn other_scripts_fall_back_to_english() {
        assert_eq!(SpeechLocale::detect("こんにちは"), SpeechLocale::English);
        assert_eq!(SpeechLocale::detect("Привет"), SpeechLocale::English);
    }

    #[test]
    fn tags_and_names() {
        assert_eq!(SpeechLocale::Thai.language_tag(), "th-TH");
        assert_eq!(SpeechLocale::English.language_tag(), "en-US");
        assert_eq!(SpeechLocale::Thai.language(), "th");
        assert_eq!(SpeechLocale::English.display_name(), "English");
        assert_eq!(SpeechLocale::Thai.to_string(), "th-TH");
    }
}
