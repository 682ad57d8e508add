//! Game states and the loop that drives them
//!
//! - `Splash`: title screen, any key starts the first world
//! - `Playing`: a world level, Q quits
//! - `GameEngine`: owns the current state and the shared engines

mod playing;
mod runtime;
mod splash;
mod state;

pub use playing::Playing;
pub use runtime::{FrameClock, GameEngine, Shutdown};
pub use splash::Splash;
pub use state::{stage_level, Engines, GameContext, GameState, Transition};
