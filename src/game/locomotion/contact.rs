// Contact events delivered to the locomotion controller

use glam::Vec2;
use serde::Deserialize;
use std::collections::VecDeque;

/// Details of a contact, as far as the physics backend reports them
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactInfo {
    /// World contact normal pointing from the player toward the other collider
    pub normal: Option<Vec2>,
}

impl ContactInfo {
    pub fn with_normal(x: f32, y: f32) -> Self {
        Self {
            normal: Some(Vec2::new(x, y)),
        }
    }
}

/// Contact notification for the player's collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    Begin(ContactInfo),
    End,
}

/// Which contact-begin events count as touching ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundContactFilter {
    /// Every contact grounds the player
    AcceptAll,
    /// Only contacts whose normal points down from the player (the surface
    /// faces up into it). Walls and ceilings are ignored.
    #[default]
    UpwardNormal,
}

impl GroundContactFilter {
    /// Check whether a contact-begin should ground the player
    pub fn accepts(self, info: &ContactInfo) -> bool {
        match self {
            GroundContactFilter::AcceptAll => true,
            GroundContactFilter::UpwardNormal => info.normal.is_some_and(|n| n.y < 0.0),
        }
    }
}

/// Pending contact events, consumed at the start of each update
#[derive(Debug, Default)]
pub struct ContactQueue {
    events: VecDeque<ContactEvent>,
}

impl ContactQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ContactEvent) {
        self.events.push_back(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = ContactEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
