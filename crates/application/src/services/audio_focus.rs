//! Audio focus arbitration between speech and background music
//!
//! Music is ducked (paused) right before an utterance starts and resumed
//! right after it ends, but only if the arbitrator itself paused it. User
//! controls go through the same arbitrator, so pausing or stopping music
//! during speech clears the ducked state and the music stays silent, while
//! playing or skipping during speech only queues the music for afterwards.

use std::sync::Arc;

use domain::MusicFocusState;
use tracing::debug;

use crate::error::ApplicationError;
use crate::ports::{MusicPlayerPort, MusicState};

/// Tracks the music focus and issues commands to the player
pub struct AudioFocusArbitrator {
    player: Arc<dyn MusicPlayerPort>,
    focus: MusicFocusState,
    speech_active: bool,
}

impl std::fmt::Debug for AudioFocusArbitrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioFocusArbitrator")
            .field("player", &"<MusicPlayerPort>")
            .field("focus", &self.focus)
            .field("speech_active", &self.speech_active)
            .finish()
    }
}

impl AudioFocusArbitrator {
    #[must_use]
    pub fn new(player: Arc<dyn MusicPlayerPort>) -> Self {
        let focus = MusicFocusState::observed(player.is_loaded(), player.is_playing());
        Self {
            player,
            focus,
            speech_active: false,
        }
    }

    #[must_use]
    pub const fn focus(&self) -> MusicFocusState {
        self.focus
    }

    /// Re-read the player unless the arbitrator holds it ducked
    fn refresh(&mut self) {
        if !self.focus.is_ducked() {
            self.focus = MusicFocusState::observed(self.player.is_loaded(), self.player.is_playing());
        }
    }

    #[must_use]
    pub const fn speech_active(&self) -> bool {
        self.speech_active
    }

    /// Pause playing music before speech; returns whether anything was paused
    pub fn duck_for_speech(&mut self) -> bool {
        self.speech_active = true;
        self.refresh();
        if self.focus == MusicFocusState::Playing {
            self.player.pause();
            self.focus = MusicFocusState::DuckedForSpeech;
            debug!("Music paused for speech");
            true
        } else {
            false
        }
    }

    /// Resume music ducked for speech; returns whether anything was resumed
    pub fn resume_after_speech(&mut self) -> bool {
        self.speech_active = false;
        if self.focus.is_ducked() {
            self.player.play();
            self.focus = MusicFocusState::Playing;
            debug!("Music resumed after speech");
            true
        } else {
            false
        }
    }

    /// Replace the playlist
    ///
    /// While ducked the new playlist inherits the ducked state and starts
    /// when speech ends.
    ///
    /// # Errors
    ///
    /// Propagates the player's error when no track is playable.
    pub fn load(&mut self, tracks: Vec<String>) -> Result<usize, ApplicationError> {
        let loaded = self.player.load_playlist(tracks)?;
        self.refresh();
        Ok(loaded)
    }

    /// User play. While speech holds focus the music starts afterwards.
    pub fn play(&mut self) {
        if self.speech_active {
            if self.player.is_loaded() {
                self.focus = MusicFocusState::DuckedForSpeech;
                debug!("Play requested during speech, deferring until speech ends");
            }
            return;
        }
        self.player.play();
        self.refresh();
    }

    /// User pause. Clears a pending resume.
    pub fn pause(&mut self) {
        self.player.pause();
        self.focus = MusicFocusState::observed(self.player.is_loaded(), false);
    }

    /// User stop. Clears a pending resume.
    pub fn stop(&mut self) {
        self.player.stop();
        self.focus = MusicFocusState::observed(self.player.is_loaded(), false);
    }

    /// Skip forward, keeping music silent while ducked
    pub fn next_track(&mut self) {
        self.player.next_track();
        self.play();
    }

    /// Skip backward, keeping music silent while ducked
    pub fn previous_track(&mut self) {
        self.player.previous_track();
        self.play();
    }

    pub fn set_volume(&self, volume: f32) {
        self.player.set_volume(volume);
    }

    #[must_use]
    pub fn current_track(&self) -> Option<String> {
        self.player.current_track()
    }

    #[must_use]
    pub fn music_state(&self) -> MusicState {
        self.player.state()
    }

    /// Stop and unload the player
    pub fn release(&mut self) {
        self.player.stop();
        self.player.release();
        self.focus = MusicFocusState::NotLoaded;
        self.speech_active = false;
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::ports::MockMusicPlayerPort;

    /// Minimal stateful player recording the commands it receives
    #[derive(Default)]
    struct FakePlayer {
        inner: Mutex<FakeInner>,
    }

    #[derive(Default)]
    struct FakeInner {
        loaded: bool,
        playing: bool,
        commands: Vec<&'static str>,
    }

    impl FakePlayer {
        fn playing() -> Arc<Self> {
            let player = Self::default();
            {
                let mut inner = player.inner.lock();
                inner.loaded = true;
                inner.playing = true;
            }
            Arc::new(player)
        }

        fn commands(&self) -> Vec<&'static str> {
            self.inner.lock().commands.clone()
        }
    }

    impl MusicPlayerPort for FakePlayer {
        fn is_loaded(&self) -> bool {
            self.inner.lock().loaded
        }
        fn is_playing(&self) -> bool {
            self.inner.lock().playing
        }
        fn play(&self) {
            let mut inner = self.inner.lock();
            inner.commands.push("play");
            inner.playing = inner.loaded;
        }
        fn pause(&self) {
            let mut inner = self.inner.lock();
            inner.commands.push("pause");
            inner.playing = false;
        }
        fn stop(&self) {
            let mut inner = self.inner.lock();
            inner.commands.push("stop");
            inner.playing = false;
        }
        fn load_playlist(&self, tracks: Vec<String>) -> Result<usize, ApplicationError> {
            let mut inner = self.inner.lock();
            inner.commands.push("load");
            inner.loaded = !tracks.is_empty();
            inner.playing = false;
            Ok(tracks.len())
        }
        fn next_track(&self) {
            self.inner.lock().commands.push("next");
        }
        fn previous_track(&self) {
            self.inner.lock().commands.push("previous");
        }
        fn set_volume(&self, _volume: f32) {}
        fn current_track(&self) -> Option<String> {
            None
        }
        fn state(&self) -> MusicState {
            let inner = self.inner.lock();
            MusicState {
                is_playing: inner.playing,
                is_loaded: inner.loaded,
                is_paused: inner.loaded && !inner.playing,
                volume: 0.5,
                current_track: String::new(),
                track_number: 1,
                playlist_size: usize::from(inner.loaded),
            }
        }
        fn release(&self) {
            let mut inner = self.inner.lock();
            inner.loaded = false;
            inner.playing = false;
        }
    }

    #[test]
    fn duck_then_resume_restores_playing() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        assert!(arbitrator.duck_for_speech());
        assert_eq!(arbitrator.focus(), MusicFocusState::DuckedForSpeech);
        assert!(!player.is_playing());

        assert!(arbitrator.resume_after_speech());
        assert_eq!(arbitrator.focus(), MusicFocusState::Playing);
        assert!(player.is_playing());
        assert_eq!(player.commands(), vec!["pause", "play"]);
    }

    #[test]
    fn duck_is_idempotent() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        assert!(arbitrator.duck_for_speech());
        assert!(!arbitrator.duck_for_speech());
        assert_eq!(arbitrator.focus(), MusicFocusState::DuckedForSpeech);
        assert_eq!(player.commands(), vec!["pause"]);
    }

    #[test]
    fn resume_is_idempotent() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.duck_for_speech();
        assert!(arbitrator.resume_after_speech());
        assert!(!arbitrator.resume_after_speech());
        assert_eq!(player.commands(), vec!["pause", "play"]);
    }

    #[test]
    fn stopped_music_is_never_resumed() {
        let mut player = MockMusicPlayerPort::new();
        player.expect_is_loaded().return_const(true);
        player.expect_is_playing().return_const(false);
        player.expect_pause().never();
        player.expect_play().never();

        let mut arbitrator = AudioFocusArbitrator::new(Arc::new(player));
        assert_eq!(arbitrator.focus(), MusicFocusState::Stopped);

        assert!(!arbitrator.duck_for_speech());
        assert!(!arbitrator.resume_after_speech());
        assert_eq!(arbitrator.focus(), MusicFocusState::Stopped);
    }

    #[test]
    fn unloaded_music_is_never_resumed() {
        let mut player = MockMusicPlayerPort::new();
        player.expect_is_loaded().return_const(false);
        player.expect_is_playing().return_const(false);
        player.expect_play().never();

        let mut arbitrator = AudioFocusArbitrator::new(Arc::new(player));
        assert!(!arbitrator.duck_for_speech());
        assert!(!arbitrator.resume_after_speech());
        assert_eq!(arbitrator.focus(), MusicFocusState::NotLoaded);
    }

    #[test]
    fn user_stop_during_speech_is_respected() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.duck_for_speech();
        arbitrator.stop();
        assert_eq!(arbitrator.focus(), MusicFocusState::Stopped);

        assert!(!arbitrator.resume_after_speech());
        assert!(!player.is_playing());
    }

    #[test]
    fn user_pause_during_speech_is_respected() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.duck_for_speech();
        arbitrator.pause();
        assert!(!arbitrator.resume_after_speech());
        assert!(!player.is_playing());
    }

    #[test]
    fn user_play_during_speech_waits_for_speech_to_end() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.duck_for_speech();
        arbitrator.play();
        assert!(!player.is_playing());
        assert_eq!(arbitrator.focus(), MusicFocusState::DuckedForSpeech);

        arbitrator.resume_after_speech();
        assert!(player.is_playing());
    }

    #[test]
    fn user_play_during_speech_over_stopped_music_waits() {
        let player = Arc::new(FakePlayer::default());
        player.inner.lock().loaded = true;
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());
        assert_eq!(arbitrator.focus(), MusicFocusState::Stopped);

        assert!(!arbitrator.duck_for_speech());
        arbitrator.play();
        assert!(!player.is_playing());
        assert_eq!(arbitrator.focus(), MusicFocusState::DuckedForSpeech);

        assert!(arbitrator.resume_after_speech());
        assert!(player.is_playing());
        assert_eq!(player.commands(), vec!["play"]);
    }

    #[test]
    fn user_play_after_pause_during_speech_waits() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.duck_for_speech();
        arbitrator.pause();
        arbitrator.play();
        assert!(!player.is_playing());

        arbitrator.resume_after_speech();
        assert!(player.is_playing());
        assert_eq!(player.commands(), vec!["pause", "pause", "play"]);
    }

    #[test]
    fn user_play_during_speech_without_playlist_does_nothing() {
        let player = Arc::new(FakePlayer::default());
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.duck_for_speech();
        arbitrator.play();
        assert_eq!(arbitrator.focus(), MusicFocusState::NotLoaded);
        assert!(!arbitrator.resume_after_speech());
        assert!(player.commands().is_empty());
    }

    #[test]
    fn skipping_tracks_over_stopped_music_during_speech_stays_silent() {
        let player = Arc::new(FakePlayer::default());
        player.inner.lock().loaded = true;
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.duck_for_speech();
        arbitrator.next_track();
        assert!(!player.is_playing());
        assert_eq!(arbitrator.focus(), MusicFocusState::DuckedForSpeech);
        assert_eq!(player.commands(), vec!["next"]);
    }

    #[test]
    fn play_after_speech_ends_starts_immediately() {
        let player = Arc::new(FakePlayer::default());
        player.inner.lock().loaded = true;
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.duck_for_speech();
        arbitrator.resume_after_speech();
        arbitrator.play();
        assert!(player.is_playing());
        assert_eq!(arbitrator.focus(), MusicFocusState::Playing);
    }

    #[test]
    fn skipping_tracks_while_ducked_stays_silent() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.duck_for_speech();
        arbitrator.next_track();
        assert!(!player.is_playing());
        assert_eq!(player.commands(), vec!["pause", "next"]);
    }

    #[test]
    fn skipping_tracks_when_not_ducked_plays() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());

        arbitrator.previous_track();
        assert_eq!(player.commands(), vec!["previous", "play"]);
        assert_eq!(arbitrator.focus(), MusicFocusState::Playing);
    }

    #[test]
    fn loading_marks_music_stopped() {
        let player = Arc::new(FakePlayer::default());
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());
        assert_eq!(arbitrator.focus(), MusicFocusState::NotLoaded);

        let loaded = arbitrator.load(vec!["a.mp3".to_string()]).unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(arbitrator.focus(), MusicFocusState::Stopped);
    }

    #[test]
    fn release_unloads() {
        let player = FakePlayer::playing();
        let mut arbitrator = AudioFocusArbitrator::new(player.clone());
        arbitrator.release();
        assert_eq!(arbitrator.focus(), MusicFocusState::NotLoaded);
        assert!(!player.is_loaded());
    }
}
