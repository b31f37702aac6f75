// Locomotion tunables and configuration loading

use super::contact::GroundContactFilter;
use crate::engine::input::{Action, InputConfig};
use crate::engine::physics::BodySettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Author-facing tunables of the locomotion controller
///
/// Every field has a default, so a config file only needs to name the values
/// it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Horizontal speed (units/second)
    pub move_speed: f32,
    /// Vertical velocity set on jump
    pub jump_force: f32,
    /// Vertical acceleration in the kinematic fallback. A physics body
    /// supplies its own gravity.
    pub gravity: f32,
    /// Seconds after a jump before another jump is allowed
    pub jump_cooldown: f32,
    /// Which contacts count as ground
    pub ground_contact_filter: GroundContactFilter,
    /// Settings applied to the physics body on attach
    pub body: BodySettings,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 10.0,
            gravity: -20.0,
            jump_cooldown: 0.1,
            ground_contact_filter: GroundContactFilter::default(),
            body: BodySettings::default(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse locomotion config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Suspicious configuration that does not stop the controller from running
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigWarning {
    #[error("Tunable `{name}` is not a finite number ({value})")]
    NonFiniteTunable { name: &'static str, value: f32 },

    #[error("Jump cooldown is negative ({0}); jumps re-arm immediately")]
    NegativeCooldown(f32),

    #[error("No key is bound to {0:?}")]
    UnboundAction(Action),

    #[error("Physics body does not report contacts; the player will never land")]
    ContactsNotReported,
}

impl LocomotionConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the tunables and bindings for values that silently break locomotion
    pub fn validate(&self, bindings: &InputConfig) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let tunables = [
            ("move_speed", self.move_speed),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("jump_cooldown", self.jump_cooldown),
        ];
        for (name, value) in tunables {
            if !value.is_finite() {
                warnings.push(ConfigWarning::NonFiniteTunable { name, value });
            }
        }

        if self.jump_cooldown < 0.0 {
            warnings.push(ConfigWarning::NegativeCooldown(self.jump_cooldown));
        }

        warnings.extend(
            bindings
                .unbound_actions()
                .into_iter()
                .map(ConfigWarning::UnboundAction),
        );

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::BodyKind;

    #[test]
    fn test_default_tunables() {
        let config = LocomotionConfig::default();
        assert_eq!(config.move_speed, 5.0);
        assert_eq!(config.jump_force, 10.0);
        assert_eq!(config.gravity, -20.0);
        assert_eq!(config.jump_cooldown, 0.1);
        assert_eq!(
            config.ground_contact_filter,
            GroundContactFilter::UpwardNormal
        );
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = LocomotionConfig::from_toml_str("").unwrap();
        assert_eq!(config, LocomotionConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            move_speed = 8.0
            jump_force = 12.5
            gravity = -30.0
            jump_cooldown = 0.25
            ground_contact_filter = "accept_all"

            [body]
            allow_sleep = true
            linear_damping = 0.0
            kind = "kinematic"
        "#;
        let config = LocomotionConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.move_speed, 8.0);
        assert_eq!(config.jump_force, 12.5);
        assert_eq!(config.gravity, -30.0);
        assert_eq!(config.jump_cooldown, 0.25);
        assert_eq!(config.ground_contact_filter, GroundContactFilter::AcceptAll);
        assert!(config.body.allow_sleep);
        assert_eq!(config.body.linear_damping, 0.0);
        assert_eq!(config.body.angular_damping, 1.0);
        assert_eq!(config.body.kind, BodyKind::Kinematic);
    }

    #[test]
    fn test_parse_rejects_non_numeric_tunable() {
        let err = LocomotionConfig::from_toml_str(r#"move_speed = "fast""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_filter() {
        let err =
            LocomotionConfig::from_toml_str(r#"ground_contact_filter = "sideways""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = LocomotionConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn test_default_config_is_clean() {
        let config = LocomotionConfig::default();
        assert!(config.validate(&InputConfig::default()).is_empty());
    }

    #[test]
    fn test_validate_flags_non_finite_tunables() {
        let config = LocomotionConfig {
            jump_force: f32::INFINITY,
            ..LocomotionConfig::default()
        };
        let warnings = config.validate(&InputConfig::default());

        assert_eq!(
            warnings,
            vec![ConfigWarning::NonFiniteTunable {
                name: "jump_force",
                value: f32::INFINITY
            }]
        );
    }

    #[test]
    fn test_validate_flags_negative_cooldown() {
        let config = LocomotionConfig {
            jump_cooldown: -1.0,
            ..LocomotionConfig::default()
        };
        let warnings = config.validate(&InputConfig::default());
        assert_eq!(warnings, vec![ConfigWarning::NegativeCooldown(-1.0)]);
    }

    #[test]
    fn test_validate_flags_unbound_jump() {
        let mut bindings = InputConfig::default();
        bindings.unbind_action(Action::Jump);

        let warnings = LocomotionConfig::default().validate(&bindings);
        assert_eq!(warnings, vec![ConfigWarning::UnboundAction(Action::Jump)]);
    }

    #[test]
    fn test_warning_display() {
        assert_eq!(
            ConfigWarning::UnboundAction(Action::Jump).to_string(),
            "No key is bound to Jump"
        );
    }
}
