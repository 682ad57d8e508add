//! Game action definitions
//!
//! Keys are bound to actions once; states only ever look at actions.

use macroquad::prelude::KeyCode;

/// All actions a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Leave the game
    Quit,
    Jump,
    MoveLeft,
    MoveRight,
}

/// Key bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<(KeyCode, Action)>,
}

impl Default for KeyMap {
    /// Q quits, Space jumps, arrows move
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::Q, Action::Quit),
                (KeyCode::Space, Action::Jump),
                (KeyCode::Left, Action::MoveLeft),
                (KeyCode::Right, Action::MoveRight),
            ],
        }
    }
}

impl KeyMap {
    /// Action bound to `key`, if any
    pub fn action(&self, key: KeyCode) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, action)| *action)
    }
}
