//! Fatal game errors
//!
//! Every variant is a broken install or an unavailable device. They bubble up
//! to `main`, which logs them and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

use crate::level::LevelError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    #[error("cannot read asset {}: {source}", .path.display())]
    AssetIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("cannot load font {}: {message}", .path.display())]
    Font { path: PathBuf, message: String },

    #[error("cannot play music {}: {message}", .path.display())]
    Audio { path: PathBuf, message: String },
}

impl GameError {
    /// Map an I/O failure on an asset to the matching error
    pub fn asset_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            GameError::AssetNotFound(path)
        } else {
            GameError::AssetIo { path, source }
        }
    }
}
