//! Input handling
//!
//! Window/keyboard events are collected into a queue of [`InputEvent`]s and
//! keys are mapped to [`Action`]s through a [`KeyMap`].

mod actions;
mod events;

pub use actions::*;
pub use events::*;
