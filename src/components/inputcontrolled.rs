//! Input-controlled components.
//!
//! - [`InputControlled`] – axis-driven velocity for the player ship
//! - [`Shooter`] – fires bullets toward the pointer on the fire button
//!
//! [`crate::systems::playercontroller`] reads these components together with
//! [`InputState`](crate::resources::input::InputState).

use bevy_ecs::prelude::Component;

/// Movement intent derived from the two input axes.
///
/// The combined axis vector is clamped to unit length and scaled by
/// `max_speed`, so diagonals are no faster than straight moves.
#[derive(Component, Clone, Copy, Debug)]
pub struct InputControlled {
    /// Speed at full axis deflection, in world units per second.
    pub max_speed: f32,
}

impl InputControlled {
    pub fn new(max_speed: f32) -> Self {
        Self { max_speed }
    }
}

/// Bullet parameters for an entity that can fire.
#[derive(Component, Clone, Copy, Debug)]
pub struct Shooter {
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub bullet_radius: f32,
}

impl Shooter {
    pub fn new(bullet_speed: f32, bullet_lifetime: f32, bullet_radius: f32) -> Self {
        Self {
            bullet_speed,
            bullet_lifetime,
            bullet_radius,
        }
    }
}
