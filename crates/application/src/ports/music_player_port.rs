//! Music player port - Interface to the background music output

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Snapshot of the player, shaped for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicState {
    pub is_playing: bool,
    pub is_loaded: bool,
    pub is_paused: bool,
    pub volume: f32,
    pub current_track: String,
    /// 1-based position in the playlist
    pub track_number: usize,
    pub playlist_size: usize,
}

/// Port for the background music player
///
/// All operations are synchronous and idempotent: pausing a paused player
/// or playing a playing one is a no-op.
#[cfg_attr(test, automock)]
pub trait MusicPlayerPort: Send + Sync {
    /// Whether a track is loaded and ready
    fn is_loaded(&self) -> bool;

    /// Whether audio is currently being rendered
    fn is_playing(&self) -> bool;

    /// Start or resume the current track
    fn play(&self);

    /// Pause, keeping the position
    fn pause(&self);

    /// Stop playback
    fn stop(&self);

    /// Replace the playlist; returns the number of playable tracks
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::MusicPlayer` if no track is playable.
    fn load_playlist(&self, tracks: Vec<String>) -> Result<usize, ApplicationError>;

    /// Move to the next track (wrapping) without changing playback state
    fn next_track(&self);

    /// Move to the previous track (wrapping) without changing playback state
    fn previous_track(&self);

    /// Set the output volume, clamped to `[0.0, 1.0]`
    fn set_volume(&self, volume: f32);

    /// Display name of the current track
    fn current_track(&self) -> Option<String>;

    /// Full player state
    fn state(&self) -> MusicState;

    /// Stop and drop the loaded playlist
    fn release(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn music_state_serializes_camel_case() {
        let state = MusicState {
            is_playing: true,
            is_loaded: true,
            is_paused: false,
            volume: 0.5,
            current_track: "song.mp3".to_string(),
            track_number: 1,
            playlist_size: 3,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"isPlaying\":true"));
        assert!(json.contains("\"currentTrack\":\"song.mp3\""));
        assert!(json.contains("\"playlistSize\":3"));
    }
}
