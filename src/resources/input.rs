//! Per-frame input resource.
//!
//! Captures the input the game cares about (two movement axes, the fire and
//! restart buttons, and the pointer position in world space) and exposes it
//! to systems via the [`InputState`] resource. The values are polled from the
//! host's [`InputSource`](crate::resources::host::InputSource) by
//! [`update_input_state`](crate::systems::input::update_input_state).
use bevy_ecs::prelude::*;
use glam::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with a press edge flag.
pub struct BoolState {
    /// Whether the button is currently held this frame.
    pub active: bool,
    /// Whether the button was just pressed this frame.
    pub just_pressed: bool,
}

impl BoolState {
    /// Feed this frame's raw level and recompute the press edge.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame input state relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    /// Horizontal axis in `[-1, 1]`, positive to the right.
    pub horizontal: f32,
    /// Vertical axis in `[-1, 1]`, positive up.
    pub vertical: f32,
    pub fire: BoolState,
    pub restart: BoolState,
    /// Last known pointer position in world space; `None` when the host has no camera.
    pub pointer: Option<Vec2>,
}

impl InputState {
    /// Axis vector clamped to unit length so diagonals are not faster.
    pub fn axis_vector(&self) -> Vec2 {
        Vec2::new(
            self.horizontal.clamp(-1.0, 1.0),
            self.vertical.clamp(-1.0, 1.0),
        )
        .clamp_length_max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
    }

    #[test]
    fn test_boolstate_press_edge() {
        let mut bs = BoolState::default();
        bs.update(true);
        assert!(bs.active && bs.just_pressed);
        bs.update(true);
        assert!(bs.active && !bs.just_pressed);
        bs.update(false);
        assert!(!bs.active && !bs.just_pressed);
        bs.update(true);
        assert!(bs.just_pressed);
    }

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        assert_eq!(input.horizontal, 0.0);
        assert_eq!(input.vertical, 0.0);
        assert!(!input.fire.active);
        assert!(!input.restart.active);
        assert!(input.pointer.is_none());
    }

    #[test]
    fn test_axis_vector_diagonal_is_unit() {
        let input = InputState {
            horizontal: 1.0,
            vertical: 1.0,
            ..Default::default()
        };
        assert!((input.axis_vector().length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_axis_vector_partial_is_not_boosted() {
        let input = InputState {
            horizontal: 0.3,
            vertical: -0.4,
            ..Default::default()
        };
        let v = input.axis_vector();
        assert!((v.x - 0.3).abs() < EPSILON);
        assert!((v.y + 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_axis_vector_clamps_out_of_range_axes() {
        let input = InputState {
            horizontal: 5.0,
            vertical: 0.0,
            ..Default::default()
        };
        assert!((input.axis_vector().x - 1.0).abs() < EPSILON);
    }
}
