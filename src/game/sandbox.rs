// Sandbox level hosting a physics-backed player

use glam::Vec2;

use super::locomotion::{
    ConfigWarning, ContactEvent, ContactInfo, LocomotionConfig, LocomotionController,
};
use crate::engine::input::InputDispatcher;
use crate::engine::physics::{presets, BodyProxy, PhysicsWorld};

/// Player collider dimensions in world units
pub const PLAYER_WIDTH: f32 = 1.0;
pub const PLAYER_HEIGHT: f32 = 2.0;

/// Where the player appears, above the middle of the ground
pub const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 3.0);

/// Ground platform, centred on the origin
pub const GROUND_WIDTH: f32 = 40.0;
pub const GROUND_HEIGHT: f32 = 1.0;

/// A flat level with one player, wiring input, physics and locomotion
/// together the way a game host would
pub struct Sandbox {
    physics: PhysicsWorld,
    input: InputDispatcher,
    player: LocomotionController<BodyProxy>,
    warnings: Vec<ConfigWarning>,
}

impl Sandbox {
    /// Build the level and attach the player controller
    pub fn new(config: LocomotionConfig) -> Self {
        let mut physics = PhysicsWorld::new();

        let ground = physics.add_rigid_body(presets::platform_body(0.0, 0.0));
        physics.add_collider(presets::platform_collider(GROUND_WIDTH, GROUND_HEIGHT), ground);

        let body = physics.add_rigid_body(presets::player_body(PLAYER_SPAWN.x, PLAYER_SPAWN.y));
        let collider =
            physics.add_collider(presets::player_collider(PLAYER_WIDTH, PLAYER_HEIGHT), body);

        let mut proxy = BodyProxy::new(body, collider);
        physics.read_body(&mut proxy);

        let mut input = InputDispatcher::new();
        let mut player = LocomotionController::with_body(config, proxy);
        let warnings = player.attach(&mut input);

        Self {
            physics,
            input,
            player,
            warnings,
        }
    }

    /// Advance one frame
    ///
    /// Order: pull body state, handle pending keys, update the controller,
    /// push body state, step physics, queue the step's contacts for the
    /// next frame.
    pub fn step(&mut self, dt: f32) {
        self.physics.set_timestep(dt);

        if let Some(body) = self.player.body_mut() {
            self.physics.read_body(body);
        }

        self.player.pump_input(&mut self.input);
        self.player.update(dt);

        if let Some(body) = self.player.body_mut() {
            self.physics.write_body(body);
        }

        self.physics.step();
        self.route_contacts();
    }

    /// Forward the last physics step's contacts involving the player
    fn route_contacts(&mut self) {
        let Some(collider) = self.player.body().map(|body| body.collider_handle()) else {
            return;
        };

        for event in self.physics.collision_events() {
            let Some(view) = event.seen_from(collider) else {
                continue;
            };

            let contact = if view.started {
                ContactEvent::Begin(ContactInfo {
                    normal: view.normal.map(|n| Vec2::new(n.x, n.y)),
                })
            } else {
                ContactEvent::End
            };
            self.player.push_contact(contact);
        }
    }

    /// Detach the player from input. The sandbox can still be stepped but
    /// no longer reacts to keys.
    pub fn shutdown(&mut self) {
        self.player.detach(&mut self.input);
    }

    /// Input dispatcher the host feeds keyboard events into
    pub fn input_mut(&mut self) -> &mut InputDispatcher {
        &mut self.input
    }

    pub fn input(&self) -> &InputDispatcher {
        &self.input
    }

    pub fn player(&self) -> &LocomotionController<BodyProxy> {
        &self.player
    }

    /// World position of the player's body
    pub fn player_position(&self) -> Option<Vec2> {
        let handle = self.player.body()?.body_handle();
        self.physics.get_rigid_body(handle).map(|body| {
            let pos = body.translation();
            Vec2::new(pos.x, pos.y)
        })
    }

    /// Configuration warnings found when the player attached
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }
}
