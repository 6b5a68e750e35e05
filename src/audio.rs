use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use kira::{
    Volume,
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
};
use thiserror::Error;

/// Every audio failure is fatal: if sound was configured, the demo refuses
/// to run silently degraded.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to initialise audio backend: {0}")]
    Backend(String),
    #[error("failed to load sound '{name}': {reason}")]
    Load { name: String, reason: String },
    #[error("failed to play sound '{name}': {reason}")]
    Play { name: String, reason: String },
    #[error("no sound loaded under the name '{0}'")]
    Unknown(String),
}

/// Thin kira wrapper: named one-shot cues plus at most one looping
/// background track.
pub struct AudioContext {
    manager: AudioManager,
    sounds: HashMap<String, StaticSoundData>,
    active_music: Option<StaticSoundHandle>,
}

impl AudioContext {
    pub fn new() -> Result<Self, AudioError> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| AudioError::Backend(e.to_string()))?;
        Ok(Self { manager, sounds: HashMap::new(), active_music: None })
    }

    /// Load a sound file (OGG, WAV) into memory under `name`.
    pub fn load_sound<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<(), AudioError> {
        let data = StaticSoundData::from_file(path.as_ref()).map_err(|e| AudioError::Load {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        self.sounds.insert(name.to_string(), data);
        Ok(())
    }

    /// Play a loaded sound once.
    pub fn play(&mut self, name: &str) -> Result<(), AudioError> {
        let data = self
            .sounds
            .get(name)
            .ok_or_else(|| AudioError::Unknown(name.to_string()))?;
        self.manager
            .play(data.clone())
            .map_err(|e| AudioError::Play { name: name.to_string(), reason: e.to_string() })?;
        Ok(())
    }

    /// Start a loaded track looping indefinitely, fading in to `volume`
    /// (amplitude). Any previous track is faded out first.
    pub fn play_music(&mut self, name: &str, volume: f64) -> Result<(), AudioError> {
        self.stop_music(0.5);

        let data = self
            .sounds
            .get(name)
            .ok_or_else(|| AudioError::Unknown(name.to_string()))?;

        let mut settings = StaticSoundSettings::new().loop_region(0.0..);
        settings.volume = Volume::Amplitude(0.0).into();

        let mut handle = self
            .manager
            .play(data.clone().with_settings(settings))
            .map_err(|e| AudioError::Play { name: name.to_string(), reason: e.to_string() })?;
        let _ = handle.set_volume(
            Volume::Amplitude(volume),
            Tween { duration: Duration::from_secs_f32(0.5), ..Default::default() },
        );
        self.active_music = Some(handle);
        Ok(())
    }

    /// Fade the active track out over `fade_secs` and drop it. No-op when
    /// nothing is playing.
    pub fn stop_music(&mut self, fade_secs: f32) {
        if let Some(mut handle) = self.active_music.take() {
            let _ = handle.stop(Tween {
                duration: Duration::from_secs_f32(fade_secs),
                ..Default::default()
            });
        }
    }
}
