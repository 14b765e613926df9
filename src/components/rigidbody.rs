//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity an entity drifts with.
//! Input and spawning code write it; the movement system integrates it into
//! [`MapPosition`](super::mapposition::MapPosition).

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity and an optional speed clamp.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `max_speed` - Optional maximum speed clamp
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            max_speed: None,
        }
    }

    /// Create a RigidBody already moving with `velocity`.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::new()
        }
    }

    /// Builder: clamp speed to `max_speed`.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    /// Set the velocity, honouring `max_speed`.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = match self.max_speed {
            Some(max) => velocity.clamp_length_max(max),
            None => velocity,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_rigidbody_new_is_still() {
        let rb = RigidBody::new();
        assert_eq!(rb.velocity, Vec2::ZERO);
        assert!(rb.max_speed.is_none());
    }

    #[test]
    fn test_set_velocity_respects_max_speed() {
        let mut rb = RigidBody::new().with_max_speed(5.0);
        rb.set_velocity(Vec2::new(30.0, 40.0));
        assert!(approx_eq(rb.velocity.length(), 5.0));
        assert!(approx_eq(rb.velocity.x, 3.0));
    }

    #[test]
    fn test_set_velocity_without_clamp() {
        let mut rb = RigidBody::new();
        rb.set_velocity(Vec2::new(0.0, -80.0));
        assert!(approx_eq(rb.velocity.y, -80.0));
        rb.set_velocity(Vec2::ZERO);
        assert_eq!(rb.velocity, Vec2::ZERO);
    }
}
