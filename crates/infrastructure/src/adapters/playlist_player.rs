//! In-memory playlist player
//!
//! Keeps the playlist, the cursor, the volume and the play/pause flags.
//! Audio output itself is out of scope; this adapter is the state a real
//! output backend would mirror.

use std::path::Path;

use application::error::ApplicationError;
use application::ports::{MusicPlayerPort, MusicState};
use parking_lot::Mutex;
use tracing::{debug, info};

/// File extensions accepted into the playlist
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "m4a", "wav", "aac", "flac", "ogg"];

#[derive(Debug)]
struct PlayerState {
    tracks: Vec<String>,
    index: usize,
    playing: bool,
    volume: f32,
}

impl PlayerState {
    fn is_loaded(&self) -> bool {
        !self.tracks.is_empty()
    }

    fn current_track(&self) -> Option<String> {
        self.tracks.get(self.index).map(|track| display_name(track))
    }
}

/// Playlist player holding state in memory
#[derive(Debug)]
pub struct PlaylistMusicPlayer {
    state: Mutex<PlayerState>,
}

impl Default for PlaylistMusicPlayer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl PlaylistMusicPlayer {
    #[must_use]
    pub fn new(volume: f32) -> Self {
        Self {
            state: Mutex::new(PlayerState {
                tracks: Vec::new(),
                index: 0,
                playing: false,
                volume: volume.clamp(0.0, 1.0),
            }),
        }
    }
}

/// Whether the path has an accepted audio extension (case-insensitive)
#[must_use]
pub fn is_audio_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

fn display_name(track: &str) -> String {
    Path::new(track)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(track)
        .to_string()
}

impl MusicPlayerPort for PlaylistMusicPlayer {
    fn is_loaded(&self) -> bool {
        self.state.lock().is_loaded()
    }

    fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    fn play(&self) {
        let mut state = self.state.lock();
        if state.is_loaded() && !state.playing {
            state.playing = true;
            debug!(track = ?state.current_track(), "Playback started");
        }
    }

    fn pause(&self) {
        self.state.lock().playing = false;
    }

    fn stop(&self) {
        let mut state = self.state.lock();
        state.playing = false;
        state.index = 0;
    }

    fn load_playlist(&self, tracks: Vec<String>) -> Result<usize, ApplicationError> {
        let total = tracks.len();
        let accepted: Vec<String> = tracks.into_iter().filter(|t| is_audio_file(t)).collect();
        if accepted.is_empty() {
            return Err(ApplicationError::MusicPlayer(format!(
                "No audio files in playlist ({total} entries)"
            )));
        }

        let mut state = self.state.lock();
        state.tracks = accepted;
        state.index = 0;
        state.playing = false;
        info!(
            tracks = state.tracks.len(),
            skipped = total - state.tracks.len(),
            "Playlist loaded"
        );
        Ok(state.tracks.len())
    }

    fn next_track(&self) {
        let mut state = self.state.lock();
        if state.is_loaded() {
            state.index = (state.index + 1) % state.tracks.len();
        }
    }

    fn previous_track(&self) {
        let mut state = self.state.lock();
        if state.is_loaded() {
            let len = state.tracks.len();
            state.index = (state.index + len - 1) % len;
        }
    }

    fn set_volume(&self, volume: f32) {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        self.state.lock().volume = volume;
    }

    fn current_track(&self) -> Option<String> {
        self.state.lock().current_track()
    }

    fn state(&self) -> MusicState {
        let state = self.state.lock();
        MusicState {
            is_playing: state.playing,
            is_loaded: state.is_loaded(),
            is_paused: state.is_loaded() && !state.playing,
            volume: state.volume,
            current_track: state.current_track().unwrap_or_default(),
            track_number: if state.is_loaded() { state.index + 1 } else { 0 },
            playlist_size: state.tracks.len(),
        }
    }

    fn release(&self) {
        let mut state = self.state.lock();
        state.tracks.clear();
        state.index = 0;
        state.playing = false;
    }
}
