//! In-game state
//!
//! Movement keys are only acknowledged for now; `on_action` is where the
//! player simulation will hook in.

use async_trait::async_trait;
use tracing::info;

use super::{stage_level, GameContext, GameState, Transition};
use crate::config::WIDTH;
use crate::error::GameError;
use crate::input::{Action, InputEvent};
use crate::level::{world_level_id, Level, Rgb};
use crate::scene::FontStyle;

/// Top edge of the level title
const TITLE_TOP: f32 = 16.0;

pub struct Playing {
    level_index: u32,
    level: Level,
}

impl Playing {
    /// Load world `level_index` and draw it
    pub async fn enter(ctx: &mut GameContext<'_>, level_index: u32) -> Result<Self, GameError> {
        let level = ctx.levels.load(&world_level_id(level_index))?;
        stage_level(ctx, &level).await?;

        ctx.scene
            .write_centered_text(&level.name, FontStyle::Medium, Rgb::BLACK, ((WIDTH / 2) as f32, TITLE_TOP));

        Ok(Self { level_index, level })
    }

    #[cfg(test)]
    pub fn level_index(&self) -> u32 {
        self.level_index
    }

    #[cfg(test)]
    pub fn level(&self) -> &Level {
        &self.level
    }

    fn on_action(&mut self, action: Action) {
        match action {
            Action::Jump => info!("Player jump"),
            Action::MoveLeft => info!("Player left"),
            Action::MoveRight => info!("Player right"),
            Action::Quit => {}
        }
    }
}

#[async_trait(?Send)]
impl GameState for Playing {
    fn name(&self) -> &'static str {
        "playing"
    }

    async fn process_events(&mut self, ctx: &mut GameContext<'_>) -> Result<Transition, GameError> {
        let mut quit = false;

        for event in ctx.events.drain() {
            match event {
                InputEvent::Quit => quit = true,
                InputEvent::KeyDown(key) => match ctx.keys.action(key) {
                    Some(Action::Quit) => quit = true,
                    Some(action) => self.on_action(action),
                    None => {}
                },
            }
        }

        if quit {
            info!("Leaving '{}' ({})", self.level.name, world_level_id(self.level_index));
            return Ok(Transition::Quit);
        }
        Ok(Transition::Stay)
    }

    fn update(&mut self, _ctx: &mut GameContext<'_>) {}

    fn draw(&mut self, _ctx: &mut GameContext<'_>) {}
}
