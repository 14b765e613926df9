//! Time-to-live component for automatic entity despawning.
//!
//! Bullets carry a [`Ttl`] so they expire when they miss. The countdown is run
//! by [`crate::systems::ttl::ttl_system`]; there is no callback, the entity is
//! simply despawned when the remaining time reaches zero.

use bevy_ecs::prelude::Component;

/// Time-to-live component that automatically despawns entities after a duration.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
}

impl Ttl {
    /// Create a new Ttl with the given duration in seconds.
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
