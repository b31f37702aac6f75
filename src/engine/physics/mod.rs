// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{
    presets, BodyKind, BodyProxy, BodySettings, ColliderHandle, NoBody, PhysicsBody,
    RigidBodyHandle,
};
pub use collision::{CollisionEvent, CollisionGroups, ContactView};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{Real, Vector};
