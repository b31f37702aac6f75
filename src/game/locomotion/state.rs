// Player locomotion state machine

/// Discrete locomotion state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving horizontally on ground
    Running,
    /// Airborne after a jump, until a landing contact
    Jumping,
    /// Airborne after losing ground contact without jumping
    Falling,
}

impl PlayerState {
    /// Check if the player is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "run",
            Self::Jumping => "jump",
            Self::Falling => "fall",
        }
    }
}

/// Tracks the current player state and how it got there
///
/// Transitions are named after the event that causes them; the machine
/// itself decides which events are allowed to change which states.
#[derive(Debug)]
pub struct PlayerStateMachine {
    current_state: PlayerState,
    previous_state: PlayerState,
    state_time: f32,
    just_changed: bool,
}

impl Default for PlayerStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: PlayerState::Idle,
            previous_state: PlayerState::Idle,
            state_time: 0.0,
            just_changed: false,
        }
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> PlayerState {
        self.previous_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Check if the state changed since the last tick
    pub fn state_just_changed(&self) -> bool {
        self.just_changed
    }

    /// Transition to a new state. Re-entering the current state is a no-op.
    pub fn transition(&mut self, new_state: PlayerState) {
        if self.current_state != new_state {
            log::debug!("player state {:?} -> {:?}", self.current_state, new_state);
            self.previous_state = self.current_state;
            self.current_state = new_state;
            self.state_time = 0.0;
            self.just_changed = true;
        }
    }

    /// Advance time in state (called once per frame, after transitions)
    pub fn tick(&mut self, dt: f32) {
        self.state_time += dt;
        self.just_changed = false;
    }

    /// Per-frame grounded update. Airborne frames leave the state alone.
    pub fn on_frame(&mut self, grounded: bool, moving: bool) {
        if !grounded {
            return;
        }
        self.transition(if moving {
            PlayerState::Running
        } else {
            PlayerState::Idle
        });
    }

    /// A jump was triggered
    pub fn on_jump(&mut self) {
        self.transition(PlayerState::Jumping);
    }

    /// A qualifying ground contact began
    pub fn on_landed(&mut self) {
        if self.current_state == PlayerState::Jumping {
            self.transition(PlayerState::Idle);
        }
    }

    /// A contact ended
    pub fn on_contact_lost(&mut self) {
        if self.current_state != PlayerState::Jumping {
            self.transition(PlayerState::Falling);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = PlayerStateMachine::new();
        assert_eq!(sm.state(), PlayerState::Idle);
        assert!(!sm.state_just_changed());
    }

    #[test]
    fn test_state_transition() {
        let mut sm = PlayerStateMachine::new();
        sm.transition(PlayerState::Running);
        assert_eq!(sm.state(), PlayerState::Running);
        assert_eq!(sm.previous_state(), PlayerState::Idle);
        assert!(sm.state_just_changed());
    }

    #[test]
    fn test_same_state_transition_keeps_time() {
        let mut sm = PlayerStateMachine::new();
        sm.tick(0.5);
        sm.transition(PlayerState::Idle);
        assert_eq!(sm.state_time(), 0.5);
        assert!(!sm.state_just_changed());
    }

    #[test]
    fn test_tick_clears_just_changed() {
        let mut sm = PlayerStateMachine::new();
        sm.on_jump();
        sm.tick(0.1);
        assert!(!sm.state_just_changed());
        assert_eq!(sm.state_time(), 0.1);
    }

    #[test]
    fn test_on_frame_grounded() {
        let mut sm = PlayerStateMachine::new();
        sm.on_frame(true, true);
        assert_eq!(sm.state(), PlayerState::Running);

        sm.on_frame(true, false);
        assert_eq!(sm.state(), PlayerState::Idle);
    }

    #[test]
    fn test_on_frame_airborne_is_untouched() {
        let mut sm = PlayerStateMachine::new();
        sm.on_jump();
        sm.on_frame(false, true);
        assert_eq!(sm.state(), PlayerState::Jumping);

        sm.transition(PlayerState::Falling);
        sm.on_frame(false, false);
        assert_eq!(sm.state(), PlayerState::Falling);
    }

    #[test]
    fn test_landing_only_clears_jumping() {
        let mut sm = PlayerStateMachine::new();
        sm.on_jump();
        sm.on_landed();
        assert_eq!(sm.state(), PlayerState::Idle);

        sm.transition(PlayerState::Falling);
        sm.on_landed();
        assert_eq!(sm.state(), PlayerState::Falling);
    }

    #[test]
    fn test_contact_lost_never_interrupts_jump() {
        let mut sm = PlayerStateMachine::new();
        sm.on_jump();
        sm.on_contact_lost();
        assert_eq!(sm.state(), PlayerState::Jumping);
    }

    #[test]
    fn test_contact_lost_from_ground_states() {
        for start in [PlayerState::Idle, PlayerState::Running, PlayerState::Falling] {
            let mut sm = PlayerStateMachine::new();
            sm.transition(start);
            sm.on_contact_lost();
            assert_eq!(sm.state(), PlayerState::Falling);
        }
    }

    #[test]
    fn test_airborne_states() {
        assert!(!PlayerState::Idle.is_airborne());
        assert!(!PlayerState::Running.is_airborne());
        assert!(PlayerState::Jumping.is_airborne());
        assert!(PlayerState::Falling.is_airborne());
    }

    #[test]
    fn test_animation_names() {
        assert_eq!(PlayerState::Idle.animation_name(), "idle");
        assert_eq!(PlayerState::Running.animation_name(), "run");
        assert_eq!(PlayerState::Jumping.animation_name(), "jump");
        assert_eq!(PlayerState::Falling.animation_name(), "fall");
    }
}
