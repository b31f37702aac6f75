use glam::Vec2;
use rapier2d::prelude::*;

use super::body::{apply_settings, BodyProxy, PhysicsBody};
use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Collision events from the last step
    collision_event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        // Events only describe the most recent step
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Copy the simulated state of a body into its proxy
    ///
    /// Call before game logic reads the proxy. A proxy whose body is
    /// missing from the world keeps its last known state.
    pub fn read_body(&self, proxy: &mut BodyProxy) {
        let Some(body) = self.rigid_body_set.get(proxy.body_handle()) else {
            log::debug!("read_body: body {:?} no longer exists", proxy.body_handle());
            return;
        };

        let linvel = body.linvel();
        let reports_contacts = self
            .collider_set
            .get(proxy.collider_handle())
            .map(|collider| {
                collider
                    .active_events()
                    .contains(ActiveEvents::COLLISION_EVENTS)
            })
            .unwrap_or(false);

        proxy.sync_from(Vec2::new(linvel.x, linvel.y), reports_contacts);
    }

    /// Commit a proxy's velocity and any pending settings to its body
    pub fn write_body(&mut self, proxy: &mut BodyProxy) {
        let Some(body) = self.rigid_body_set.get_mut(proxy.body_handle()) else {
            log::debug!("write_body: body {:?} no longer exists", proxy.body_handle());
            return;
        };

        if let Some(settings) = proxy.take_pending_settings() {
            apply_settings(body, &settings);
        }

        let velocity = proxy.linear_velocity();
        body.set_linvel(vector![velocity.x, velocity.y], true);
    }

    /// Get all collision events from the last step
    pub fn collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::{presets, BodySettings, ColliderBuilder2D};

    fn spawn_player(world: &mut PhysicsWorld, x: f32, y: f32) -> BodyProxy {
        let body = world.add_rigid_body(presets::player_body(x, y));
        let collider = world.add_collider(presets::player_collider(1.0, 2.0), body);
        BodyProxy::new(body, collider)
    }

    #[test]
    fn test_default_world() {
        let world = PhysicsWorld::new();
        assert_eq!(world.gravity, vector![0.0, -9.81]);
        assert!((world.integration_parameters.dt - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_read_body_pulls_velocity() {
        let mut world = PhysicsWorld::new();
        let mut proxy = spawn_player(&mut world, 0.0, 10.0);

        if let Some(body) = world.rigid_body_set.get_mut(proxy.body_handle()) {
            body.set_linvel(vector![2.0, 3.0], true);
        }
        world.read_body(&mut proxy);

        assert_eq!(proxy.linear_velocity(), Vec2::new(2.0, 3.0));
        assert!(proxy.reports_contacts());
    }

    #[test]
    fn test_read_body_detects_silent_collider() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::player_body(0.0, 0.0));
        let collider = world.add_collider(
            ColliderBuilder2D::capsule(0.5, 0.5).without_events().build(),
            body,
        );
        let mut proxy = BodyProxy::new(body, collider);

        world.read_body(&mut proxy);
        assert!(!proxy.reports_contacts());
    }

    #[test]
    fn test_write_body_pushes_velocity_and_settings() {
        let mut world = PhysicsWorld::new();
        let mut proxy = spawn_player(&mut world, 0.0, 10.0);

        proxy.set_linear_velocity(Vec2::new(5.0, -1.0));
        proxy.configure(&BodySettings {
            linear_damping: 0.7,
            ..BodySettings::default()
        });
        world.write_body(&mut proxy);

        let body = world.get_rigid_body(proxy.body_handle()).unwrap();
        assert_eq!(*body.linvel(), vector![5.0, -1.0]);
        assert_eq!(body.linear_damping(), 0.7);
    }

    #[test]
    fn test_unknown_body_is_ignored() {
        let mut world = PhysicsWorld::new();
        let mut proxy = BodyProxy::new(
            RigidBodyHandle::from_raw_parts(7, 0),
            ColliderHandle::from_raw_parts(7, 0),
        );

        proxy.set_linear_velocity(Vec2::new(1.0, 0.0));
        world.write_body(&mut proxy);
        world.read_body(&mut proxy);

        assert_eq!(proxy.linear_velocity(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_falling_body_reports_contact_with_platform() {
        let mut world = PhysicsWorld::new();
        let ground = world.add_rigid_body(presets::platform_body(0.0, 0.0));
        world.add_collider(presets::platform_collider(20.0, 1.0), ground);
        let proxy = spawn_player(&mut world, 0.0, 2.0);

        let mut started = None;
        for _ in 0..120 {
            world.step();
            started = world
                .collision_events()
                .iter()
                .filter_map(|event| event.seen_from(proxy.collider_handle()))
                .find(|view| view.started);
            if started.is_some() {
                break;
            }
        }

        let view = started.expect("player never touched the platform");
        let normal = view.normal.expect("contact should carry a normal");
        assert!(normal.y < 0.0, "ground normal should point down from the player");
    }
}
