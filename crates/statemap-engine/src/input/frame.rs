use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton};

/// Input collected between two redraws.
///
/// `events` keeps arrival order (derived drags sit right after the pointer
/// move that produced them), so camera updates replay deterministically.
/// The transition sets answer "did X happen this frame" without a scan.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,

    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,

    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
