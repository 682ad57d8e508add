//! Level descriptors
//!
//! A level is a small JSON document naming the music, background and scenery
//! of a screen. Documents live under `data/level/<id>.json` and are checked
//! against `data/level/level.schema.json` before being decoded.

mod repository;

pub use repository::*;

use serde::{Deserialize, Serialize};

/// 8-bit RGB color, encoded in level files as `[r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Opaque RGBA pixel
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.0, self.1, self.2, 255])
    }
}

/// Level information
///
/// Decoding is strict: every field must be present with the right shape and
/// unknown fields are rejected, even when the schema would let them through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Level {
    /// Display name, drawn as the level title
    pub name: String,
    /// Track path relative to the music root
    pub music: String,
    /// Solid fill behind the background image
    pub background_color: Rgb,
    /// Image path relative to the backgrounds root
    pub background_img: String,
    /// Image path relative to the backgrounds root
    pub scenery_img: String,
}
