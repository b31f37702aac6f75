use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Player characters
    Player = 0b0000_0010,

    /// Static platforms and walls
    Platform = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Players stand on platforms but pass through each other
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Platform as u32 | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Platform => Group::from_bits_truncate(
                CollisionGroups::Player as u32
                    | CollisionGroups::Platform as u32
                    | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Collision event recorded during a physics step
///
/// `normal` is the world-space contact normal pointing from `collider1`
/// toward `collider2`, when rapier had a contact manifold for the pair.
#[derive(Debug, Clone, Copy)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        normal: Option<Vector<Real>>,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        normal: Option<Vector<Real>>,
    },
}

/// A collision event as seen by one of the two colliders involved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactView {
    pub started: bool,
    pub other: ColliderHandle,
    /// Points away from the observing collider, toward `other`
    pub normal: Option<Vector<Real>>,
}

impl CollisionEvent {
    /// View this event from `collider`, or `None` if it is not involved
    pub fn seen_from(&self, collider: ColliderHandle) -> Option<ContactView> {
        let (started, collider1, collider2, normal) = match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
                normal,
            } => (true, collider1, collider2, normal),
            CollisionEvent::Stopped {
                collider1,
                collider2,
                normal,
            } => (false, collider1, collider2, normal),
        };

        if collider == collider1 {
            Some(ContactView {
                started,
                other: collider2,
                normal,
            })
        } else if collider == collider2 {
            Some(ContactView {
                started,
                other: collider1,
                normal: normal.map(|n| -n),
            })
        } else {
            None
        }
    }
}

/// World normal of a contact pair, oriented from `from` toward the other collider
fn pair_normal(pair: &ContactPair, from: ColliderHandle) -> Option<Vector<Real>> {
    let manifold = pair
        .manifolds
        .iter()
        .find(|m| !m.points.is_empty())
        .or_else(|| pair.manifolds.first())?;

    let normal = manifold.data.normal;
    if normal.norm_squared() == 0.0 {
        return None;
    }

    if pair.collider1 == from {
        Some(normal)
    } else {
        Some(-normal)
    }
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this frame
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Add a collision event
    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                    normal: contact_pair.and_then(|pair| pair_normal(pair, h1)),
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                    normal: contact_pair.and_then(|pair| pair_normal(pair, h1)),
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
