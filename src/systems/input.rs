//! Input systems.
//!
//! - [`update_input_state`] polls the host [`InputSource`] each frame and
//!   writes the results into [`InputState`].
//! - Button presses are emitted as [`InputEvent`]s.
//! - [`input_action_observer`] starts a game from the main menu and restarts
//!   after game over.
//!
//! [`InputSource`]: crate::resources::host::InputSource
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error};

use crate::events::input::{InputAction, InputEvent};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::host::{Axis, Button, InputDevice};
use crate::resources::input::{BoolState, InputState};
use crate::resources::systemsstore::SystemsStore;

/// Store key of the exclusive restart system.
pub const RESTART_SYSTEM: &str = "restart";

/// Poll the host for input and update the `InputState` resource.
///
/// Without an [`InputDevice`] the resource is left untouched, which lets
/// tests drive `InputState` directly.
pub fn update_input_state(
    device: Option<Res<InputDevice>>,
    mut input: ResMut<InputState>,
    mut commands: Commands,
) {
    let Some(device) = device else {
        return;
    };
    let source = device.0.as_ref();

    input.horizontal = source.axis(Axis::Horizontal).clamp(-1.0, 1.0);
    input.vertical = source.axis(Axis::Vertical).clamp(-1.0, 1.0);
    input.pointer = source.pointer_world();

    input.fire.update(source.button_down(Button::Fire));
    input.restart.update(source.button_down(Button::Restart));

    emit_press(&mut commands, InputAction::Fire, &input.fire);
    emit_press(&mut commands, InputAction::Restart, &input.restart);
}

fn emit_press(commands: &mut Commands, action: InputAction, state: &BoolState) {
    if state.just_pressed {
        commands.trigger(InputEvent { action });
    }
}

/// Menu-level reactions to button presses.
///
/// - Any press in `MainMenu` requests `PreLevel`.
/// - `Restart` in `GameOver` runs the registered restart system.
pub fn input_action_observer(
    trigger: On<InputEvent>,
    mut commands: Commands,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
    systems_store: Res<SystemsStore>,
) {
    let event = trigger.event();
    match (state.get(), event.action) {
        (GameStates::MainMenu, _) => {
            debug!("{:?} pressed in main menu, starting", event.action);
            next_state.set(GameStates::PreLevel);
        }
        (GameStates::GameOver, InputAction::Restart) => match systems_store.require(RESTART_SYSTEM) {
            Ok(id) => {
                commands.run_system(id);
            }
            Err(e) => error!("Cannot restart: {}", e),
        },
        _ => {}
    }
}
