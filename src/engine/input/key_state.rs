// Raw pressed/released state per key

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Last known state of every key an input source has reported
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    keys: HashMap<KeyCode, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition
    pub fn set(&mut self, key: KeyCode, pressed: bool) {
        self.keys.insert(key, pressed);
    }

    /// Check if a key is currently held. Keys never reported count as released.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// Check if any of the given keys is held
    pub fn any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.is_pressed(*key))
    }

    /// Forget every key
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
