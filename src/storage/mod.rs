//! Storage layer
//!
//! Read-only access to the game's data directory. Level descriptors and the
//! level schema are read through here so every I/O failure carries the path
//! that caused it.

pub mod local;

pub use local::LocalStorage;

use std::path::PathBuf;
use thiserror::Error;

/// Storage error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    /// File or directory not found
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// Contents are not UTF-8 text
    #[error("{} is not valid UTF-8", .0.display())]
    InvalidUtf8(PathBuf),
    /// Any other I/O error
    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl StorageError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(path: impl Into<PathBuf>, e: std::io::Error) -> Self {
        let path = path.into();
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(path),
            std::io::ErrorKind::InvalidData => StorageError::InvalidUtf8(path),
            _ => StorageError::Io { path, message: e.to_string() },
        }
    }
}
