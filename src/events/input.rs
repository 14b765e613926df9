//! Discrete input events.
//!
//! [`update_input_state`](crate::systems::input::update_input_state) triggers
//! an [`InputEvent`] on the frame a button goes down, so observers can react
//! to presses without polling
//! [`InputState`](crate::resources::input::InputState).

use bevy_ecs::prelude::*;

/// Buttons the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Fire,
    Restart,
}

/// A button was pressed this frame.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub action: InputAction,
}
