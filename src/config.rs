//! Game configuration
//!
//! Fixed display constants plus the few knobs exposed on the command line.
//! Everything on disk hangs off a single data directory:
//! - `level/`             level descriptors and their schema
//! - `assets/musics/`     music tracks
//! - `assets/backgrounds/` background and scenery images
//! - `assets/fonts/`      TTF fonts

use clap::Parser;
use std::path::PathBuf;

/// Window caption and title screen text
pub const GAME_NAME: &str = "TLN Power";

/// Logical viewport width in pixels
pub const WIDTH: u32 = 960;
/// Logical viewport height in pixels
pub const HEIGHT: u32 = 640;

/// Target ticks per second
pub const DEFAULT_FPS: u32 = 60;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "tln-power")]
#[command(about = "A little 2D side-scrolling platformer")]
pub struct Cli {
    /// Root directory holding `level/` and `assets/`
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Frame rate limit (0 = unlimited)
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Run in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub data_dir: PathBuf,
    pub fps: u32,
    pub fullscreen: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fps: DEFAULT_FPS,
            fullscreen: true,
        }
    }
}

impl From<Cli> for GameConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_dir: cli.data_dir,
            fps: cli.fps,
            fullscreen: !cli.windowed,
        }
    }
}

impl GameConfig {
    pub fn level_dir(&self) -> PathBuf {
        self.data_dir.join("level")
    }

    pub fn music_dir(&self) -> PathBuf {
        self.assets_dir().join("musics")
    }

    pub fn backgrounds_dir(&self) -> PathBuf {
        self.assets_dir().join("backgrounds")
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.assets_dir().join("fonts")
    }

    fn assets_dir(&self) -> PathBuf {
        self.data_dir.join("assets")
    }

    /// Frame budget in seconds (None = unlimited)
    pub fn frame_time(&self) -> Option<f64> {
        if self.fps == 0 {
            None
        } else {
            Some(1.0 / self.fps as f64)
        }
    }
}
