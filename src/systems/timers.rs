//! Timer queue processing.
//!
//! - [`update_timers`] pops every due entry of the
//!   [`TimerQueue`](crate::resources::timerqueue::TimerQueue) and triggers a
//!   [`TimerEvent`] for it.
//! - [`timer_observer`] ends the ship's immunity and moves on from the
//!   post-level pause.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::playership::PlayerShip;
use crate::events::timer::TimerEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::timerqueue::{TimerQueue, TimerSignal};
use crate::resources::worldtime::WorldTime;

/// Fire every timer whose wake time has been reached.
///
/// Timers whose owner entity no longer exists are dropped silently.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut queue: ResMut<TimerQueue>,
    mut commands: Commands,
) {
    for due in queue.pop_due(world_time.elapsed) {
        if let Some(owner) = due.owner {
            if commands.get_entity(owner).is_err() {
                debug!("Dropping {:?} timer of despawned {:?}", due.signal, owner);
                continue;
            }
        }
        commands.trigger(TimerEvent {
            entity: due.owner,
            signal: due.signal,
        });
    }
}

/// React to expired timers.
///
/// - `ImmunityExpired` puts the owning ship back to `Normal`.
/// - `PostLevelDone` requests `PreLevel` if the game is still between levels.
pub fn timer_observer(
    trigger: On<TimerEvent>,
    mut ships: Query<&mut PlayerShip>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    let event = trigger.event();
    match event.signal {
        TimerSignal::ImmunityExpired => {
            let Some(owner) = event.entity else {
                return;
            };
            if let Ok(mut ship) = ships.get_mut(owner) {
                ship.end_immunity();
                info!("Ship immunity over");
            }
        }
        TimerSignal::PostLevelDone => {
            if state.get() == GameStates::PostLevel {
                next_state.set(GameStates::PreLevel);
            } else {
                debug!("PostLevelDone fired in {:?}, ignored", state.get());
            }
        }
    }
}
