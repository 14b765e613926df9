//! Level completion.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::resources::gamestate::{GameStates, NextGameState, NextGameStates};
use crate::resources::registry::EntityRegistry;
use crate::resources::session::Session;

/// Request `PostLevel` once every asteroid of the level is gone.
///
/// Runs only while the game is in `Level`. A transition already requested
/// this frame wins, and a session with no lives left never clears a level:
/// the last asteroid and the last life can go in the same frame, and that
/// frame must end in `GameOver`.
pub fn level_cleared_system(
    registry: Res<EntityRegistry>,
    session: Option<Res<Session>>,
    mut next_state: ResMut<NextGameState>,
) {
    if registry.asteroid_count() != 0 {
        return;
    }
    if let NextGameStates::Pending(pending) = next_state.get() {
        debug!("Level cleared while {:?} is pending, keeping it", pending);
        return;
    }
    if session.is_some_and(|s| s.is_out_of_lives()) {
        debug!("Level cleared with no lives left, not advancing");
        return;
    }
    info!("All asteroids destroyed, level cleared");
    next_state.set(GameStates::PostLevel);
}
