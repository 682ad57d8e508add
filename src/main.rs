//! TLN Power: a little 2D side-scrolling platformer
//!
//! Title screen, then the first world level, both described by JSON level
//! files under `data/level/`.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod audio;
mod config;
mod error;
mod game;
mod input;
mod level;
mod scene;
mod storage;

#[cfg(test)]
mod testing;

use anyhow::Context;
use clap::Parser;
use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::prelude::*;

use audio::MusicEngine;
use config::{Cli, GameConfig, GAME_NAME, HEIGHT, WIDTH};
use game::{Engines, FrameClock, GameEngine, Shutdown};
use input::{KeyMap, KeyboardEvents};
use level::LevelRepository;
use scene::{SceneCompositor, WindowScreen};

fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: GAME_NAME.to_string(),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        fullscreen: config.fullscreen,
        platform: miniquad::conf::Platform {
            swap_interval: Some(1),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tln_power=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GameConfig::from(Cli::parse());
    info!("{} v{} (data: {})", GAME_NAME, VERSION, config.data_dir.display());

    macroquad::Window::from_config(window_conf(&config), async move {
        match run(config).await {
            Ok(shutdown) => info!("Shutdown: {:?}", shutdown),
            Err(e) => {
                error!("{:?}", e);
                std::process::exit(1);
            }
        }
    });
}

async fn run(config: GameConfig) -> anyhow::Result<Shutdown> {
    let screen = WindowScreen::new(&config.fonts_dir()).context("cannot open the game screen")?;
    let engines = Engines {
        scene: SceneCompositor::new(Box::new(screen), config.backgrounds_dir()),
        music: Box::new(MusicEngine::new(config.music_dir())),
        levels: LevelRepository::new(config.level_dir()),
        events: Box::new(KeyboardEvents::new()),
        keys: KeyMap::default(),
    };

    let engine = GameEngine::new(engines, FrameClock::new(config.frame_time()))
        .await
        .context("cannot start the title screen")?;

    #[cfg(not(target_arch = "wasm32"))]
    {
        let interrupt = engine.interrupt_flag();
        ctrlc::set_handler(move || interrupt.store(true, std::sync::atomic::Ordering::SeqCst))
            .context("cannot install the Ctrl-C handler")?;
    }

    Ok(engine.run().await?)
}
