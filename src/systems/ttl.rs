//! TTL (Time-to-live) system.
//!
//! This module provides the [`ttl_system`] that decrements TTL timers and
//! despawns entities when their time runs out.
//!
//! # System Flow
//!
//! Each frame:
//!
//! 1. `ttl_system` iterates all entities with [`Ttl`](crate::components::ttl::Ttl)
//! 2. Decrements `remaining` by the scaled frame delta
//! 3. When `remaining <= 0`, unregisters the entity and despawns it

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::ttl::Ttl;
use crate::resources::registry::EntityRegistry;
use crate::resources::worldtime::WorldTime;

/// Decrements TTL and despawns entities when it reaches zero.
///
/// Expired bullets are removed from the
/// [`EntityRegistry`](crate::resources::registry::EntityRegistry) so the
/// collision resolver no longer treats them as live.
pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut registry: Option<ResMut<EntityRegistry>>,
    mut commands: Commands,
) {
    let dt = world_time.delta; // delta is already scaled by time_scale
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            if let Some(registry) = registry.as_deref_mut() {
                registry.remove_bullet(entity);
                registry.remove_asteroid(entity);
            }
            debug!("TTL expired for {:?}", entity);
            commands.entity(entity).try_despawn();
        }
    }
}
