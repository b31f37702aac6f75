// Input dispatcher - routes keyboard events to subscribed listeners

use super::action::KeyInput;
use std::collections::{HashMap, VecDeque};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Identifies one listener registered with an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// A stream of key-down/key-up events that listeners subscribe to
///
/// Events are queued per subscription and handed out by `drain`, so a
/// listener processes them at a point of its own choosing instead of inside
/// a re-entrant callback.
pub trait InputSource {
    /// Register a new listener
    fn subscribe(&mut self) -> Subscription;

    /// Remove a listener. Unknown or already removed subscriptions are ignored.
    fn unsubscribe(&mut self, subscription: Subscription);

    /// Take every pending event for a listener, oldest first
    fn drain(&mut self, subscription: Subscription) -> Vec<KeyInput>;
}

/// Host-side input source fed by winit keyboard events
#[derive(Debug, Default)]
pub struct InputDispatcher {
    next_id: u64,

    /// Pending events per subscriber
    mailboxes: HashMap<Subscription, VecDeque<KeyInput>>,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only physical key codes are routed
        let PhysicalKey::Code(key) = event.physical_key else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                // Held keys report repeats; only the first press counts
                if !event.repeat {
                    self.dispatch(KeyInput::down(key));
                }
            }
            ElementState::Released => self.dispatch(KeyInput::up(key)),
        }
    }

    /// Deliver an event to every subscriber
    pub fn dispatch(&mut self, input: KeyInput) {
        for mailbox in self.mailboxes.values_mut() {
            mailbox.push_back(input);
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.mailboxes.len()
    }

    /// Check whether a subscription is still registered
    pub fn is_subscribed(&self, subscription: Subscription) -> bool {
        self.mailboxes.contains_key(&subscription)
    }
}

impl InputSource for InputDispatcher {
    fn subscribe(&mut self) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.mailboxes.insert(subscription, VecDeque::new());
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.mailboxes.remove(&subscription);
    }

    fn drain(&mut self, subscription: Subscription) -> Vec<KeyInput> {
        self.mailboxes
            .get_mut(&subscription)
            .map(|mailbox| mailbox.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_subscribe_registers_listener() {
        let mut dispatcher = InputDispatcher::new();
        let sub = dispatcher.subscribe();

        assert!(dispatcher.is_subscribed(sub));
        assert_eq!(dispatcher.subscriber_count(), 1);
    }

    #[test]
    fn test_subscriptions_are_unique() {
        let mut dispatcher = InputDispatcher::new();
        let a = dispatcher.subscribe();
        let b = dispatcher.subscribe();
        assert_ne!(a, b);
    }

    #[test]
    fn test_dispatch_reaches_every_subscriber() {
        let mut dispatcher = InputDispatcher::new();
        let a = dispatcher.subscribe();
        let b = dispatcher.subscribe();

        dispatcher.dispatch(KeyInput::down(KeyCode::Space));

        assert_eq!(dispatcher.drain(a), vec![KeyInput::down(KeyCode::Space)]);
        assert_eq!(dispatcher.drain(b), vec![KeyInput::down(KeyCode::Space)]);
    }

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut dispatcher = InputDispatcher::new();
        let sub = dispatcher.subscribe();

        dispatcher.dispatch(KeyInput::down(KeyCode::KeyA));
        dispatcher.dispatch(KeyInput::up(KeyCode::KeyA));

        assert_eq!(
            dispatcher.drain(sub),
            vec![KeyInput::down(KeyCode::KeyA), KeyInput::up(KeyCode::KeyA)]
        );
        assert!(dispatcher.drain(sub).is_empty());
    }

    #[test]
    fn test_events_before_subscribe_are_not_delivered() {
        let mut dispatcher = InputDispatcher::new();
        dispatcher.dispatch(KeyInput::down(KeyCode::KeyD));

        let sub = dispatcher.subscribe();
        assert!(dispatcher.drain(sub).is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut dispatcher = InputDispatcher::new();
        let sub = dispatcher.subscribe();
        dispatcher.unsubscribe(sub);

        dispatcher.dispatch(KeyInput::down(KeyCode::KeyD));
        assert!(dispatcher.drain(sub).is_empty());
        assert_eq!(dispatcher.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_twice_is_harmless() {
        let mut dispatcher = InputDispatcher::new();
        let sub = dispatcher.subscribe();
        dispatcher.unsubscribe(sub);
        dispatcher.unsubscribe(sub);
        assert_eq!(dispatcher.subscriber_count(), 0);
    }
}
