// Locomotion action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents every action the locomotion controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    /// All actions, in declaration order
    pub const ALL: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Jump];
}

/// A single key transition delivered by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: KeyCode,
    pub pressed: bool,
}

impl KeyInput {
    /// Create a key-down event
    pub fn down(key: KeyCode) -> Self {
        Self { key, pressed: true }
    }

    /// Create a key-up event
    pub fn up(key: KeyCode) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Default keyboard bindings (WASD-style left/right plus arrows, space to jump)
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::Space, Action::Jump),
    ]
}
