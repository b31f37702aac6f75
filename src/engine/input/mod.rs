// Input handling system
//
// Keyboard input for the locomotion controller: key bindings, raw key state
// and a subscription-based dispatcher fed by winit.
//
// ## Architecture
//
// - `action`: Locomotion actions, key events and default key bindings
// - `config`: Key binding configuration and remapping
// - `key_state`: Pressed/released state per key
// - `dispatcher`: `InputSource` contract and the winit-backed dispatcher
//
// ## Usage Example
//
// ```rust
// use rusted_locomotion::engine::input::{InputDispatcher, InputSource};
//
// let mut dispatcher = InputDispatcher::new();
// let subscription = dispatcher.subscribe();
//
// // In your event loop, forward keyboard events
// dispatcher.process_keyboard_event(&key_event);
//
// // Whenever the listener is ready, take its pending events
// for input in dispatcher.drain(subscription) {
//     // input.key, input.pressed
// }
//
// dispatcher.unsubscribe(subscription);
// ```

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod key_state;

// Re-export commonly used types
pub use action::{Action, KeyInput};
pub use config::InputConfig;
pub use dispatcher::{InputDispatcher, InputSource, Subscription};
pub use key_state::KeyState;
