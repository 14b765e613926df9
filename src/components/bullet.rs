use bevy_ecs::prelude::Component;

/// Marks a projectile fired by the ship.
///
/// Direction and speed live in the entity's
/// [`RigidBody`](super::rigidbody::RigidBody); lifetime in its
/// [`Ttl`](super::ttl::Ttl).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bullet;
