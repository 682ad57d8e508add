//! Title screen
//!
//! Shows the game name over the splash level and waits for any key.

use async_trait::async_trait;
use tracing::info;

use super::{stage_level, GameContext, GameState, Playing, Transition};
use crate::config::{GAME_NAME, HEIGHT, WIDTH};
use crate::error::GameError;
use crate::input::InputEvent;
use crate::level::{Level, Rgb, SPLASH_LEVEL};
use crate::scene::FontStyle;

/// Line under the title
pub const PROMPT: &str = "Appuie sur une touche";

const TITLE_COLOR: Rgb = Rgb(16, 86, 103);

/// Gap between the title and the prompt
const LINE_GAP: f32 = 16.0;

/// Level started when leaving the title screen
const FIRST_LEVEL: u32 = 1;

pub struct Splash {
    level: Level,
}

impl Splash {
    /// Load the splash level and draw the title screen
    pub async fn enter(ctx: &mut GameContext<'_>) -> Result<Self, GameError> {
        let level = ctx.levels.load(SPLASH_LEVEL)?;
        stage_level(ctx, &level).await?;

        let center_x = (WIDTH / 2) as f32;
        let title_y = (HEIGHT / 3) as f32;
        let title = ctx
            .scene
            .write_centered_text(GAME_NAME, FontStyle::Large, TITLE_COLOR, (center_x, title_y));
        ctx.scene.write_centered_text(
            PROMPT,
            FontStyle::Small,
            Rgb::WHITE,
            (center_x, title_y + LINE_GAP + title.height),
        );

        Ok(Self { level })
    }

    #[cfg(test)]
    pub fn level(&self) -> &Level {
        &self.level
    }
}

#[async_trait(?Send)]
impl GameState for Splash {
    fn name(&self) -> &'static str {
        "splash"
    }

    async fn process_events(&mut self, ctx: &mut GameContext<'_>) -> Result<Transition, GameError> {
        let mut quit = false;
        let mut next: Option<Playing> = None;

        for event in ctx.events.drain() {
            info!("{}: {:?}", self.level.name, event);
            match event {
                InputEvent::Quit => quit = true,
                InputEvent::KeyDown(_) if next.is_none() => {
                    next = Some(Playing::enter(ctx, FIRST_LEVEL).await?);
                }
                InputEvent::KeyDown(_) => {}
            }
        }

        Ok(match (quit, next) {
            (true, _) => Transition::Quit,
            (false, Some(playing)) => Transition::Switch(Box::new(playing)),
            (false, None) => Transition::Stay,
        })
    }

    fn update(&mut self, _ctx: &mut GameContext<'_>) {}

    fn draw(&mut self, _ctx: &mut GameContext<'_>) {}
}
