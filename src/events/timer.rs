//! Timer expiration events.
//!
//! When an entry of the [`TimerQueue`](crate::resources::timerqueue::TimerQueue)
//! reaches its wake time, a [`TimerEvent`] is triggered. Observers match on
//! the signal to end the ship's immunity or start the next level.
//!
//! # Related
//!
//! - [`crate::systems::timers::update_timers`] – the system that emits these events
//! - [`crate::systems::timers::timer_observer`] – the observer that handles them

use bevy_ecs::prelude::*;

use crate::resources::timerqueue::TimerSignal;

/// Event emitted when a timer expires.
///
/// `entity` is the owner the timer was scheduled for, if any.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    /// The entity that owns the timer.
    pub entity: Option<Entity>,
    /// What the timer was scheduled for.
    pub signal: TimerSignal,
}
