//! Input event queue
//!
//! Each tick a state drains every event queued since the previous tick.

use macroquad::prelude::*;

/// Input events the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close request
    Quit,
    KeyDown(KeyCode),
}

/// Source of queued input events
pub trait EventSource {
    /// Take all pending events, oldest first; never blocks
    fn drain(&mut self) -> Vec<InputEvent>;
}

/// Keyboard and window events from macroquad
pub struct KeyboardEvents;

impl KeyboardEvents {
    /// Turns window close into an event instead of exiting
    pub fn new() -> Self {
        prevent_quit();
        Self
    }
}

impl Default for KeyboardEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for KeyboardEvents {
    fn drain(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if is_quit_requested() {
            events.push(InputEvent::Quit);
        }
        let mut keys: Vec<KeyCode> = get_keys_pressed().into_iter().collect();
        // HashSet order is arbitrary; keep drains reproducible
        keys.sort_by_key(|k| *k as u16);
        events.extend(keys.into_iter().map(InputEvent::KeyDown));
        events
    }
}
