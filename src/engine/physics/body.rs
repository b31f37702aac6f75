use super::collision::CollisionGroups;
use glam::Vec2;
use rapier2d::prelude::*;
use serde::Deserialize;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// How the engine integrates a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Affected by gravity, forces and collisions
    Dynamic,
    /// Moved only by its velocity, ignores forces
    Kinematic,
}

impl BodyKind {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Dynamic => RigidBodyType::Dynamic,
            BodyKind::Kinematic => RigidBodyType::KinematicVelocityBased,
        }
    }
}

/// Engine policy knobs applied to a body once, when a controller attaches
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub allow_sleep: bool,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Lock rotation so the character stays upright
    pub fixed_rotation: bool,
    pub kind: BodyKind,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            allow_sleep: false,
            linear_damping: 0.1,
            angular_damping: 1.0,
            fixed_rotation: true,
            kind: BodyKind::Dynamic,
        }
    }
}

/// Narrow view of an engine-owned rigid body
///
/// The locomotion controller only reads and writes linear velocity through
/// this trait, so any physics backend (or a test double) can sit behind it.
pub trait PhysicsBody {
    fn linear_velocity(&self) -> Vec2;

    fn set_linear_velocity(&mut self, velocity: Vec2);

    /// Apply engine policy settings. Called once on attach.
    fn configure(&mut self, settings: &BodySettings);

    /// Whether the body's collider emits contact events. A body that does
    /// not will never be reported as grounded.
    fn reports_contacts(&self) -> bool {
        true
    }
}

/// Placeholder body type for controllers that run without physics
///
/// It has no values, so a controller holding `Option<NoBody>` always takes
/// the kinematic path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoBody {}

impl PhysicsBody for NoBody {
    fn linear_velocity(&self) -> Vec2 {
        match *self {}
    }

    fn set_linear_velocity(&mut self, _velocity: Vec2) {
        match *self {}
    }

    fn configure(&mut self, _settings: &BodySettings) {
        match *self {}
    }
}

/// Velocity mirror of a rapier rigid body
///
/// The physics world owns the real body; `PhysicsWorld::read_body` copies its
/// state into the proxy before game logic runs and `PhysicsWorld::write_body`
/// commits the proxy back afterwards.
#[derive(Debug, Clone)]
pub struct BodyProxy {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    velocity: Vec2,
    reports_contacts: bool,
    pending_settings: Option<BodySettings>,
}

impl BodyProxy {
    pub fn new(body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            body,
            collider,
            velocity: Vec2::ZERO,
            reports_contacts: true,
            pending_settings: None,
        }
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    pub(crate) fn sync_from(&mut self, velocity: Vec2, reports_contacts: bool) {
        self.velocity = velocity;
        self.reports_contacts = reports_contacts;
    }

    pub(crate) fn take_pending_settings(&mut self) -> Option<BodySettings> {
        self.pending_settings.take()
    }
}

impl PhysicsBody for BodyProxy {
    fn linear_velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn configure(&mut self, settings: &BodySettings) {
        self.pending_settings = Some(settings.clone());
    }

    fn reports_contacts(&self) -> bool {
        self.reports_contacts
    }
}

/// Apply body settings to a live rapier body
pub fn apply_settings(body: &mut RigidBody, settings: &BodySettings) {
    body.set_body_type(settings.kind.to_rapier(), true);
    body.set_linear_damping(settings.linear_damping);
    body.set_angular_damping(settings.angular_damping);
    body.lock_rotations(settings.fixed_rotation, true);

    *body.activation_mut() = if settings.allow_sleep {
        RigidBodyActivation::active()
    } else {
        RigidBodyActivation::cannot_sleep()
    };
    body.wake_up(true);
}

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            gravity_scale: 1.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            gravity_scale: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (useful for player characters)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    restitution: Real,
    density: Real,
    active_events: ActiveEvents,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }

    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a capsule-shaped collider (good for characters)
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        let a = point![0.0, -half_height];
        let b = point![0.0, half_height];
        Self::with_shape(SharedShape::capsule(a, b, radius))
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Stop emitting collision events for this collider
    pub fn without_events(mut self) -> Self {
        self.active_events = ActiveEvents::empty();
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .active_events(self.active_events)
            .build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;

    /// Create a player character body (dynamic, rotation locked)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .gravity_scale(1.0)
            .can_sleep(false)
            .build()
    }

    /// Create a player character collider (capsule shape)
    pub fn player_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = (height / 2.0) - radius;

        ColliderBuilder2D::capsule(half_height, radius)
            .collision_groups(CollisionGroups::Player)
            .friction(0.0) // No friction for smooth movement
            .density(1.0)
            .build()
    }

    /// Create a platform body (fixed/static)
    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a platform collider (box shape)
    pub fn platform_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Platform)
            .friction(0.3)
            .build()
    }
}
