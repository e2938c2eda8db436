//! Audio cue dispatch
//!
//! The simulation only raises [`GameEvent`]s. This module turns the ones that
//! have a sound into [`AudioCue`]s and hands them to a platform backend.
//! Playback failures never reach the simulation: they are logged and dropped.

use std::fmt;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sounds the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Looping background music, started when a run begins
    BackgroundLoop,
    /// Bullet fired
    Shoot,
}

impl AudioCue {
    pub fn is_music(self) -> bool {
        matches!(self, AudioCue::BackgroundLoop)
    }
}

/// The cue for an event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::MusicStarted => Some(AudioCue::BackgroundLoop),
        GameEvent::ShotFired => Some(AudioCue::Shoot),
        _ => None,
    }
}

/// Why a backend could not play a cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No output device or context
    Unavailable,
    /// Asset missing or undecodable
    MissingAsset(AudioCue),
    /// Backend-specific failure
    Playback(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "audio output unavailable"),
            AudioError::MissingAsset(cue) => write!(f, "no asset for {:?}", cue),
            AudioError::Playback(msg) => write!(f, "playback failed: {}", msg),
        }
    }
}

impl std::error::Error for AudioError {}

/// Platform sound output (Web Audio, cpal, ...)
pub trait AudioBackend {
    /// Start playing `cue` at `volume` (0.0 - 1.0), restarting it if it is
    /// already playing
    fn play(&mut self, cue: AudioCue, volume: f32) -> Result<(), AudioError>;
}

/// Backend that plays nothing; used headless
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, cue: AudioCue, volume: f32) -> Result<(), AudioError> {
        log::trace!("(silent) {:?} at {:.2}", cue, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    failures: u32,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            failures: 0,
        }
    }

    /// Get effective volume for a cue
    fn effective_volume(&self, cue: AudioCue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if cue.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a cue; failures are logged and swallowed
    pub fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume(cue);
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play(cue, vol) {
            self.failures += 1;
            log::warn!("Audio cue {:?} failed: {}", cue, e);
        }
    }

    /// Play the cues for a tick's events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(cue_for) {
            self.play(cue);
        }
    }

    /// Playback failures swallowed so far
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records what it was asked to play; fails on demand
    #[derive(Default)]
    struct Recorder {
        played: Vec<(AudioCue, f32)>,
        fail: bool,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, cue: AudioCue, volume: f32) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::MissingAsset(cue));
            }
            self.played.push((cue, volume));
            Ok(())
        }
    }

    #[test]
    fn test_events_map_to_cues() {
        assert_eq!(cue_for(&GameEvent::MusicStarted), Some(AudioCue::BackgroundLoop));
        assert_eq!(cue_for(&GameEvent::ShotFired), Some(AudioCue::Shoot));
        assert_eq!(cue_for(&GameEvent::Jumped), None);
    }

    #[test]
    fn test_channel_volumes() {
        let mut audio = AudioManager::new(Recorder::default(), &Settings::default());
        audio.handle_events(&[GameEvent::MusicStarted, GameEvent::Landed, GameEvent::ShotFired]);
        let played = &audio.backend().played;
        assert_eq!(played.len(), 2);
        assert_eq!(played[0].0, AudioCue::BackgroundLoop);
        assert!((played[0].1 - 0.8 * 0.7).abs() < 1e-6);
        assert!((played[1].1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Recorder::default(), &settings);
        audio.play(AudioCue::Shoot);
        assert!(audio.backend().played.is_empty());
    }

    #[test]
    fn test_failures_are_swallowed() {
        let backend = Recorder {
            fail: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(backend, &Settings::default());
        audio.play(AudioCue::Shoot);
        audio.play(AudioCue::BackgroundLoop);
        assert_eq!(audio.failures(), 2);
        assert_eq!(
            AudioError::MissingAsset(AudioCue::Shoot).to_string(),
            "no asset for Shoot"
        );
    }
}
