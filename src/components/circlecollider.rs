use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Circular collider centred on the entity position.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct CircleCollider {
    pub radius: f32,
}

impl CircleCollider {
    /// Create a CircleCollider with given radius
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.abs(),
        }
    }

    /// Circle vs circle overlap test against another collider at a different entity position.
    /// Touching circles do not count as overlapping.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        let reach = self.radius + other.radius;
        position.distance_squared(other_position) < reach * reach
    }
}
