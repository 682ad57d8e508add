//! Local filesystem storage backend
//!
//! All operations complete immediately (synchronous) and never write.

use super::StorageError;
use std::path::{Path, PathBuf};

/// Local filesystem storage backend rooted at a base directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for relative paths
    base_dir: PathBuf,
}

impl LocalStorage {
    /// Create a local storage backend rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a path relative to the base directory
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Read a file as UTF-8 text
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Result<String, StorageError> {
        let full_path = self.resolve(path);
        std::fs::read_to_string(&full_path).map_err(|e| StorageError::from_io(full_path, e))
    }
}
