use bevy_ecs::prelude::Component;

/// Marker for entities that survive a session restart (observers, registered systems).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Persistent;
