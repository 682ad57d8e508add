//! Music playback
//!
//! One music channel: starting a track stops the previous one, tracks loop
//! forever.

use std::path::PathBuf;

use async_trait::async_trait;
use macroquad::audio::{load_sound_from_bytes, play_sound, stop_sound, PlaySoundParams, Sound};
use tracing::info;

use crate::error::GameError;

/// Anything that can loop a music track
#[async_trait(?Send)]
pub trait MusicPort {
    /// Loop `track` (relative to the music root) in place of the current one
    async fn play_music(&mut self, track: &str) -> Result<(), GameError>;
}

/// macroquad audio backend
pub struct MusicEngine {
    base: PathBuf,
    current: Option<Sound>,
}

impl MusicEngine {
    pub fn new(music_dir: impl Into<PathBuf>) -> Self {
        Self {
            base: music_dir.into(),
            current: None,
        }
    }
}

#[async_trait(?Send)]
impl MusicPort for MusicEngine {
    async fn play_music(&mut self, track: &str) -> Result<(), GameError> {
        let path = self.base.join(track);
        let bytes = std::fs::read(&path).map_err(|e| GameError::asset_io(path.clone(), e))?;

        // Decoding may span frames (wasm waits on the browser)
        let sound = load_sound_from_bytes(&bytes).await.map_err(|e| GameError::Audio {
            path: path.clone(),
            message: format!("{:?}", e),
        })?;

        if let Some(previous) = self.current.take() {
            stop_sound(&previous);
        }
        play_sound(&sound, PlaySoundParams { looped: true, volume: 1.0 });
        self.current = Some(sound);

        info!("Play '{}'", path.display());
        Ok(())
    }
}
