//! Per-frame input state
//!
//! Platform code translates key events into [`InputState`] and hands it to the
//! game's update by reference. Nothing reads keys through global state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    S,
    I,
    K,
    Space,
    Escape,
}

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

/// Up/down key binding for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleControls {
    pub up: Key,
    pub down: Key,
}

impl PaddleControls {
    pub const PLAYER_ONE: PaddleControls = PaddleControls {
        up: Key::W,
        down: Key::S,
    };
    pub const PLAYER_TWO: PaddleControls = PaddleControls {
        up: Key::I,
        down: Key::K,
    };

    /// (up held, down held)
    pub fn read(&self, input: &InputState) -> (bool, bool) {
        (input.is_down(self.up), input.is_down(self.down))
    }
}

/// Shared serve key
pub const KICK_OFF_KEY: Key = Key::Space;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::new();
        assert!(!input.is_down(Key::W));
        input.press(Key::W);
        input.press(Key::W);
        assert!(input.is_down(Key::W));
        input.release(Key::W);
        assert!(!input.is_down(Key::W));
        // Releasing an unknown key is fine
        input.release(Key::K);
    }

    #[test]
    fn test_controls_read() {
        let mut input = InputState::new();
        input.press(Key::K);
        assert_eq!(PaddleControls::PLAYER_ONE.read(&input), (false, false));
        assert_eq!(PaddleControls::PLAYER_TWO.read(&input), (false, true));
        input.release_all();
        assert_eq!(PaddleControls::PLAYER_TWO.read(&input), (false, false));
    }
}
