//! Registry of live asteroid and bullet entities.
//!
//! The collision resolver treats membership here as the source of truth for
//! "still alive this frame". Despawns go through deferred commands, so an
//! asteroid hit by two bullets in the same frame would otherwise be split
//! twice; removing it from the registry first makes the second contact a
//! no-op.
//!
//! Entities that disappear without passing through the resolver (bullets
//! timing out) are removed by [`ttl_system`](crate::systems::ttl::ttl_system).

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashSet;

/// Live asteroid and bullet handles.
#[derive(Debug, Clone, Default, Resource)]
pub struct EntityRegistry {
    asteroids: FxHashSet<Entity>,
    bullets: FxHashSet<Entity>,
}

impl EntityRegistry {
    /// Register an asteroid. Returns `false` if it was already registered.
    pub fn add_asteroid(&mut self, entity: Entity) -> bool {
        self.asteroids.insert(entity)
    }

    /// Unregister an asteroid. Returns `false` if it was not registered.
    pub fn remove_asteroid(&mut self, entity: Entity) -> bool {
        self.asteroids.remove(&entity)
    }

    pub fn has_asteroid(&self, entity: Entity) -> bool {
        self.asteroids.contains(&entity)
    }

    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    pub fn asteroids(&self) -> impl Iterator<Item = Entity> + '_ {
        self.asteroids.iter().copied()
    }

    /// Register a bullet. Returns `false` if it was already registered.
    pub fn add_bullet(&mut self, entity: Entity) -> bool {
        self.bullets.insert(entity)
    }

    /// Unregister a bullet. Returns `false` if it was not registered.
    pub fn remove_bullet(&mut self, entity: Entity) -> bool {
        self.bullets.remove(&entity)
    }

    pub fn has_bullet(&self, entity: Entity) -> bool {
        self.bullets.contains(&entity)
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    pub fn clear(&mut self) {
        self.asteroids.clear();
        self.bullets.clear();
    }
}
