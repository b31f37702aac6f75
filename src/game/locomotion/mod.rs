// Player locomotion
//
// This module contains the decision layer that turns input and contact
// events into player movement:
// - Tunables and configuration loading
// - Contact events and the ground-contact filter
// - State machine for the player's locomotion state
// - The controller tying them together each frame

pub mod config;
pub mod contact;
pub mod controller;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, ConfigWarning, LocomotionConfig};
pub use contact::{ContactEvent, ContactInfo, GroundContactFilter};
pub use controller::LocomotionController;
pub use state::{PlayerState, PlayerStateMachine};
