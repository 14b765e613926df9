//! Game state transition event and observer.
//!
//! Systems can request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and invokes the enter hook stored in
//! [`crate::resources::systemsstore::SystemsStore`].
//!
//! This decouples the intent to change state from the mechanics of running
//! enter hooks and avoids borrowing conflicts.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};

/// Store key of the hook run when entering `PreLevel`.
pub const ENTER_PRE_LEVEL: &str = "enter_pre_level";
/// Store key of the hook run when entering `Level`.
pub const ENTER_LEVEL: &str = "enter_level";
/// Store key of the hook run when entering `PostLevel`.
pub const ENTER_POST_LEVEL: &str = "enter_post_level";
/// Store key of the hook run when entering `GameOver`.
pub const ENTER_GAME_OVER: &str = "enter_game_over";

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// Emitting this event causes [`observe_gamestate_change_event`] to read
/// [`NextGameState`]. If it contains [`Pending`], the observer updates the
/// authoritative [`GameState`], runs the enter hook, and clears the pending
/// value; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], resets
///   [`NextGameState`] to [`Unchanged`] and queues the enter hook for the new
///   state.
/// - A transition to the state that is already active is dropped, so enter
///   hooks (and with them game over) run once per entry.
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Option<Res<SystemsStore>>,
) {
    debug!("GameStateChangedEvent triggered");

    if next_game_state.is_none() || game_state.is_none() || systems_store.is_none() {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}, systems_store: {:?}",
            next_game_state.is_some(),
            game_state.is_some(),
            systems_store.is_some()
        );
        return;
    }
    let (Some(next_game_state), Some(game_state), Some(systems_store)) = (
        next_game_state.as_deref_mut(),
        game_state.as_deref_mut(),
        systems_store.as_deref(),
    ) else {
        return;
    };

    match next_game_state.get() {
        Pending(new_state) => {
            next_game_state.reset();
            let old_state = game_state.get();
            if old_state == new_state {
                debug!("Already in {:?}, ignoring transition", new_state);
                return;
            }
            info!("Transitioning from {:?} to {:?}", old_state, new_state);
            game_state.set(new_state);
            on_state_enter(new_state, &mut commands, systems_store);
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

/// Hook key for a state, if the state has one.
pub fn enter_hook_for(state: GameStates) -> Option<&'static str> {
    match state {
        GameStates::None | GameStates::MainMenu => None,
        GameStates::PreLevel => Some(ENTER_PRE_LEVEL),
        GameStates::Level => Some(ENTER_LEVEL),
        GameStates::PostLevel => Some(ENTER_POST_LEVEL),
        GameStates::GameOver => Some(ENTER_GAME_OVER),
    }
}

/// Internal: run the state-specific "enter" system for the given state.
fn on_state_enter(state: GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    let Some(hook) = enter_hook_for(state) else {
        debug!("Entered {:?} state", state);
        return;
    };
    match systems_store.require(hook) {
        Ok(id) => {
            commands.run_system(id);
        }
        Err(e) => error!("Cannot enter {:?}: {}", state, e),
    }
}
