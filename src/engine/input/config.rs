// Key binding configuration and remapping

use super::action::{default_bindings, Action};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps keys to locomotion actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Mapping from keys to actions
    bindings: HashMap<KeyCode, Action>,

    /// Reverse mapping for quick lookups (action -> all keys)
    action_to_keys: HashMap<Action, Vec<KeyCode>>,
}

impl InputConfig {
    /// Create an empty configuration with nothing bound
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            action_to_keys: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        let mut config = Self::empty();
        for (key, action) in bindings {
            config.bind(key, action);
        }
        config
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        // A key drives at most one action
        self.unbind_source(key);

        self.bindings.insert(key, action);
        self.action_to_keys.entry(action).or_default().push(key);
    }

    /// Unbind a key
    pub fn unbind_source(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.action_to_keys.get_mut(&action) {
                keys.retain(|k| *k != key);
                if keys.is_empty() {
                    self.action_to_keys.remove(&action);
                }
            }
        }
    }

    /// Unbind all keys for an action
    pub fn unbind_action(&mut self, action: Action) {
        if let Some(keys) = self.action_to_keys.remove(&action) {
            for key in keys {
                self.bindings.remove(&key);
            }
        }
    }

    /// Get the action bound to a key
    pub fn action(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Get all keys bound to an action
    pub fn sources(&self, action: Action) -> &[KeyCode] {
        self.action_to_keys
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_keys.contains_key(&action)
    }

    /// Actions with no key bound
    pub fn unbound_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| !self.has_binding(*action))
            .collect()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::empty();
        config.bind(KeyCode::KeyA, Action::MoveLeft);

        assert_eq!(config.action(KeyCode::KeyA), Some(Action::MoveLeft));
    }

    #[test]
    fn test_unbind_source() {
        let mut config = InputConfig::empty();
        config.bind(KeyCode::KeyA, Action::MoveLeft);
        config.unbind_source(KeyCode::KeyA);

        assert_eq!(config.action(KeyCode::KeyA), None);
        assert!(!config.has_binding(Action::MoveLeft));
    }

    #[test]
    fn test_unbind_action() {
        let mut config = InputConfig::default();
        config.unbind_action(Action::MoveLeft);

        assert_eq!(config.action(KeyCode::KeyA), None);
        assert_eq!(config.action(KeyCode::ArrowLeft), None);
        assert!(config.sources(Action::MoveLeft).is_empty());
    }

    #[test]
    fn test_sources() {
        let config = InputConfig::default();
        let sources = config.sources(Action::MoveRight);

        assert_eq!(sources.len(), 2);
        assert!(sources.contains(&KeyCode::KeyD));
        assert!(sources.contains(&KeyCode::ArrowRight));
    }

    #[test]
    fn test_rebind_key() {
        let mut config = InputConfig::empty();
        config.bind(KeyCode::KeyW, Action::MoveLeft);
        config.bind(KeyCode::KeyW, Action::Jump);

        assert_eq!(config.action(KeyCode::KeyW), Some(Action::Jump));
        assert!(!config.has_binding(Action::MoveLeft));
    }

    #[test]
    fn test_unbound_actions() {
        let mut config = InputConfig::default();
        assert!(config.unbound_actions().is_empty());

        config.unbind_action(Action::Jump);
        assert_eq!(config.unbound_actions(), vec![Action::Jump]);
    }
}
