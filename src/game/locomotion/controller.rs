// Player locomotion controller

use glam::Vec2;
use log::{debug, info, warn};

use super::config::{ConfigWarning, LocomotionConfig};
use super::contact::{ContactEvent, ContactInfo, ContactQueue};
use super::state::{PlayerState, PlayerStateMachine};
use crate::engine::input::{Action, InputConfig, InputSource, KeyInput, KeyState, Subscription};
use crate::engine::physics::{NoBody, PhysicsBody};

/// Slack when checking the remaining cooldown, so that e.g. two 0.05s frames
/// re-arm a 0.1s cooldown.
const COOLDOWN_EPSILON: f32 = 1e-6;

/// Turns key state and contact events into player velocity and state
///
/// With a physics body attached the controller only writes the body's
/// horizontal velocity each frame (and the vertical channel on jump); the
/// body integrates everything else. Without a body it moves a local position
/// and integrates its own gravity.
///
/// Per frame, `update` runs in this order:
/// 1. re-arm the jump once the cooldown has run out
/// 2. apply queued contact events
/// 3. movement from the held left/right keys
/// 4. grounded state update
/// 5. gravity (kinematic fallback only)
#[derive(Debug)]
pub struct LocomotionController<B: PhysicsBody = NoBody> {
    config: LocomotionConfig,
    bindings: InputConfig,
    keys: KeyState,

    /// Engine body, or `None` for the kinematic fallback
    body: Option<B>,
    /// Position and velocity of the kinematic fallback
    position: Vec2,
    velocity: Vec2,

    /// Direction derived from the keys in the last update
    input_direction: Vec2,

    grounded: bool,
    jump_ready: bool,
    /// Seconds until `jump_ready` comes back
    jump_cooldown_left: Option<f32>,

    state: PlayerStateMachine,
    contacts: ContactQueue,
    subscription: Option<Subscription>,
}

impl LocomotionController<NoBody> {
    /// Create a controller that moves its own position
    pub fn kinematic(config: LocomotionConfig) -> Self {
        Self::new(config, None)
    }
}

impl<B: PhysicsBody> LocomotionController<B> {
    /// Create a controller, optionally driving a physics body
    pub fn new(config: LocomotionConfig, body: Option<B>) -> Self {
        Self {
            config,
            bindings: InputConfig::default(),
            keys: KeyState::new(),
            body,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            input_direction: Vec2::ZERO,
            grounded: true,
            jump_ready: true,
            jump_cooldown_left: None,
            state: PlayerStateMachine::new(),
            contacts: ContactQueue::new(),
            subscription: None,
        }
    }

    /// Create a controller driving a physics body
    pub fn with_body(config: LocomotionConfig, body: B) -> Self {
        Self::new(config, Some(body))
    }

    /// Replace the key bindings
    pub fn with_bindings(mut self, bindings: InputConfig) -> Self {
        self.bindings = bindings;
        self
    }

    // --- Lifecycle ---

    /// Subscribe to an input source and configure the body
    ///
    /// Returns the configuration warnings found while attaching; they are
    /// also logged. Attaching an already attached controller does nothing.
    pub fn attach<I: InputSource + ?Sized>(&mut self, input: &mut I) -> Vec<ConfigWarning> {
        if self.subscription.is_some() {
            debug!("attach: controller already attached");
            return Vec::new();
        }

        self.subscription = Some(input.subscribe());

        let mut warnings = self.config.validate(&self.bindings);
        if let Some(body) = self.body.as_mut() {
            body.configure(&self.config.body);
            if !body.reports_contacts() {
                warnings.push(ConfigWarning::ContactsNotReported);
            }
        }

        for warning in &warnings {
            warn!("Locomotion config: {}", warning);
        }

        info!(
            "Locomotion controller attached ({})",
            if self.body.is_some() {
                "physics body"
            } else {
                "kinematic"
            }
        );

        warnings
    }

    /// Unsubscribe from the input source. Safe to call at any time, any
    /// number of times.
    pub fn detach<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        if let Some(subscription) = self.subscription.take() {
            input.unsubscribe(subscription);
            // Releases will no longer arrive
            self.keys.clear();
            info!("Locomotion controller detached");
        }
    }

    /// Check if the controller is subscribed to an input source
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    // --- Input ---

    /// Handle every pending key event from the input source, in order
    pub fn pump_input<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        let Some(subscription) = self.subscription else {
            return;
        };

        for key_input in input.drain(subscription) {
            self.handle_key(key_input);
        }
    }

    /// Record a key transition. Pressing a jump key attempts the jump
    /// right away.
    pub fn handle_key(&mut self, input: KeyInput) {
        self.keys.set(input.key, input.pressed);

        if input.pressed && self.bindings.action(input.key) == Some(Action::Jump) {
            self.try_jump();
        }
    }

    /// Jump if grounded and the cooldown has expired. Returns whether the
    /// jump happened.
    ///
    /// Queued contacts are applied first, so the jump sees the latest
    /// ground state and no older contact can cancel it afterwards.
    pub fn try_jump(&mut self) -> bool {
        self.process_contacts();

        if !self.grounded || !self.jump_ready {
            debug!(
                "jump blocked (grounded: {}, ready: {})",
                self.grounded, self.jump_ready
            );
            return false;
        }

        let jump_force = self.config.jump_force;
        self.velocity.y = jump_force;
        if let Some(body) = self.body.as_mut() {
            let mut velocity = body.linear_velocity();
            velocity.y = jump_force;
            body.set_linear_velocity(velocity);
        }

        self.grounded = false;
        self.jump_ready = false;
        self.jump_cooldown_left = Some(self.config.jump_cooldown.max(0.0));
        self.state.on_jump();

        true
    }

    // --- Contacts ---

    /// Queue a contact event for the next update
    pub fn push_contact(&mut self, event: ContactEvent) {
        self.contacts.push(event);
    }

    /// Apply every queued contact event now
    pub fn process_contacts(&mut self) {
        let events: Vec<ContactEvent> = self.contacts.drain().collect();
        for event in events {
            match event {
                ContactEvent::Begin(info) => self.on_contact_begin(&info),
                ContactEvent::End => self.on_contact_end(),
            }
        }
    }

    fn on_contact_begin(&mut self, info: &ContactInfo) {
        if !self.config.ground_contact_filter.accepts(info) {
            debug!("contact ignored by ground filter (normal: {:?})", info.normal);
            return;
        }

        self.grounded = true;

        // Kinematic fallback: standing on something stops the fall
        if self.body.is_none() && self.velocity.y < 0.0 {
            self.velocity.y = 0.0;
        }

        self.state.on_landed();
    }

    fn on_contact_end(&mut self) {
        self.grounded = false;
        self.state.on_contact_lost();
    }

    // --- Frame update ---

    /// Advance the controller by one frame
    pub fn update(&mut self, dt: f32) {
        self.refresh_jump_cooldown(dt);
        self.process_contacts();

        self.apply_movement(dt);
        self.state
            .on_frame(self.grounded, self.input_direction != Vec2::ZERO);
        self.apply_gravity(dt);

        self.state.tick(dt);
    }

    fn refresh_jump_cooldown(&mut self, dt: f32) {
        let Some(left) = self.jump_cooldown_left.as_mut() else {
            return;
        };

        *left -= dt;
        if *left <= COOLDOWN_EPSILON {
            self.jump_ready = true;
            self.jump_cooldown_left = None;
        }
    }

    fn is_action_held(&self, action: Action) -> bool {
        self.keys.any_pressed(self.bindings.sources(action))
    }

    fn apply_movement(&mut self, dt: f32) {
        let mut direction = Vec2::ZERO;
        if self.is_action_held(Action::MoveLeft) {
            direction.x -= 1.0;
        }
        if self.is_action_held(Action::MoveRight) {
            direction.x += 1.0;
        }
        self.input_direction = direction.normalize_or_zero();

        let target_x = self.input_direction.x * self.config.move_speed;

        match self.body.as_mut() {
            Some(body) => {
                // Vertical channel belongs to the body's integrator
                let mut velocity = body.linear_velocity();
                velocity.x = target_x;
                body.set_linear_velocity(velocity);
            }
            None => {
                self.velocity.x = target_x;
                self.position.x += target_x * dt;
                self.position.y += self.velocity.y * dt;
            }
        }
    }

    fn apply_gravity(&mut self, dt: f32) {
        if self.body.is_none() && !self.grounded {
            self.velocity.y += self.config.gravity * dt;
        }
    }

    // --- Accessors ---

    /// Current locomotion state
    pub fn state(&self) -> PlayerState {
        self.state.state()
    }

    /// State machine bookkeeping (previous state, time in state)
    pub fn state_machine(&self) -> &PlayerStateMachine {
        &self.state
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_jump_ready(&self) -> bool {
        self.jump_ready
    }

    /// Direction computed by the last update
    pub fn input_direction(&self) -> Vec2 {
        self.input_direction
    }

    /// Velocity of the body, or of the kinematic fallback
    pub fn velocity(&self) -> Vec2 {
        self.body
            .as_ref()
            .map(|body| body.linear_velocity())
            .unwrap_or(self.velocity)
    }

    /// Position of the kinematic fallback
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport the kinematic fallback
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> Option<&mut B> {
        self.body.as_mut()
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn bindings(&self) -> &InputConfig {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut InputConfig {
        &mut self.bindings
    }

    pub fn key_state(&self) -> &KeyState {
        &self.keys
    }

    /// Number of contact events waiting for the next update
    pub fn pending_contacts(&self) -> usize {
        self.contacts.len()
    }
}
