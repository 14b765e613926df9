//! Collision event type.
//!
//! The collision detector emits [`CollisionEvent`] whenever two entities with
//! colliders overlap, and the host can emit the same event for contacts its
//! own physics found via [`Game::on_collision`](crate::game::Game::on_collision).
//! [`collision_observer`](crate::systems::collision::collision_observer)
//! resolves it.
use bevy_ecs::prelude::*;

/// Event fired when two entities touch.
///
/// The two fields, [`CollisionEvent::a`] and [`CollisionEvent::b`], are the
/// entity IDs of the participants. No ordering guarantees are provided.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}
