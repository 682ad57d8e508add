//! Level loading
//!
//! Two independent gates guard every level:
//! 1. JSON Schema validation (structure, ranges)
//! 2. Strict serde decoding into [`Level`] (exact field set and types)
//!
//! A document failing either gate is a broken install, so errors carry the
//! file path and are never recovered from here.

use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::Level;
use crate::storage::{LocalStorage, StorageError};

/// Schema file shared by every level, next to the level files
pub const SCHEMA_FILE: &str = "level.schema.json";

/// Name of the level shown on the title screen
pub const SPLASH_LEVEL: &str = "splash";

/// Level id for a playable world, e.g. `world-1`
pub fn world_level_id(index: u32) -> String {
    format!("world-{}", index)
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer into the level document (empty for the root)
    pub instance_path: String,
    /// Which constraint failed
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let at = if self.instance_path.is_empty() { "/" } else { &self.instance_path };
        write!(f, "at {}: {}", at, self.message)
    }
}

/// Error type for level loading
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("cannot read level data: {0}")]
    Io(#[from] StorageError),

    #[error("{} is not valid JSON: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("level schema {} does not compile: {message}", .path.display())]
    Schema { path: PathBuf, message: String },

    #[error("{} violates the level schema: {}", .path.display(), join_violations(.violations))]
    Validation {
        path: PathBuf,
        violations: Vec<Violation>,
    },

    #[error("{} does not decode into a level: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Loads level descriptors from a directory
#[derive(Debug, Clone)]
pub struct LevelRepository {
    storage: LocalStorage,
}

impl LevelRepository {
    pub fn new(level_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage: LocalStorage::new(level_dir),
        }
    }

    /// Load, validate and decode `<level_id>.json`
    pub fn load(&self, level_id: &str) -> Result<Level, LevelError> {
        let file = format!("{}.json", level_id);
        let path = self.storage.resolve(&file);

        let document = self.read_json(&file)?;
        let schema = self.read_json(SCHEMA_FILE)?;

        validate(&schema, &document, &path, &self.storage.resolve(SCHEMA_FILE))?;
        debug!("{} passed schema validation", path.display());

        let level: Level = serde_json::from_value(document)
            .map_err(|source| LevelError::Decode { path: path.clone(), source })?;

        info!("Loaded level '{}' from {}", level.name, path.display());
        Ok(level)
    }

    fn read_json(&self, file: &str) -> Result<Value, LevelError> {
        let text = self.storage.read_to_string(file)?;
        serde_json::from_str(&text).map_err(|source| LevelError::Malformed {
            path: self.storage.resolve(file),
            source,
        })
    }
}

/// Check `document` against `schema`, collecting every violation
fn validate(schema: &Value, document: &Value, path: &Path, schema_path: &Path) -> Result<(), LevelError> {
    let compiled = JSONSchema::compile(schema).map_err(|e| LevelError::Schema {
        path: schema_path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Err(errors) = compiled.validate(document) {
        let violations = errors
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();
        return Err(LevelError::Validation {
            path: path.to_path_buf(),
            violations,
        });
    }

    Ok(())
}
