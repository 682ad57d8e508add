//! Game states
//!
//! Exactly one state is current. Each tick the driver calls
//! `process_events`, then `update`, then `draw` on it. A state may hand back
//! its successor from `process_events`; the successor has already run its
//! setup by then. Setup is async because loading music may take frames.

use std::fmt;

use async_trait::async_trait;

use crate::audio::MusicPort;
use crate::error::GameError;
use crate::input::{EventSource, KeyMap};
use crate::level::{Level, LevelRepository};
use crate::scene::SceneCompositor;

/// The shared engines, owned by the driver for the whole run
pub struct Engines {
    pub scene: SceneCompositor,
    pub music: Box<dyn MusicPort>,
    pub levels: LevelRepository,
    pub events: Box<dyn EventSource>,
    pub keys: KeyMap,
}

impl Engines {
    /// Borrow every engine for one state call
    pub fn context(&mut self) -> GameContext<'_> {
        GameContext {
            scene: &mut self.scene,
            music: self.music.as_mut(),
            levels: &self.levels,
            events: self.events.as_mut(),
            keys: &self.keys,
        }
    }
}

/// What states see of the engines during a call
pub struct GameContext<'a> {
    pub scene: &'a mut SceneCompositor,
    pub music: &'a mut dyn MusicPort,
    pub levels: &'a LevelRepository,
    pub events: &'a mut dyn EventSource,
    pub keys: &'a KeyMap,
}

/// Outcome of draining a tick's events
pub enum Transition {
    /// Keep the current state
    Stay,
    /// Replace the current state with an already set-up one
    Switch(Box<dyn GameState>),
    /// End the game loop
    Quit,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Stay => write!(f, "Stay"),
            Transition::Switch(next) => write!(f, "Switch({})", next.name()),
            Transition::Quit => write!(f, "Quit"),
        }
    }
}

#[async_trait(?Send)]
pub trait GameState {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Drain and handle every queued input event
    async fn process_events(&mut self, ctx: &mut GameContext<'_>) -> Result<Transition, GameError>;

    /// Advance the simulation by one tick
    fn update(&mut self, ctx: &mut GameContext<'_>);

    /// Render one frame
    fn draw(&mut self, ctx: &mut GameContext<'_>);
}

/// Start a level's music, background and scenery
pub async fn stage_level(ctx: &mut GameContext<'_>, level: &Level) -> Result<(), GameError> {
    ctx.music.play_music(&level.music).await?;
    ctx.scene.set_background(level.background_color, &level.background_img)?;
    ctx.scene.set_scenery(&level.scenery_img)?;
    Ok(())
}
