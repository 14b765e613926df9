//! Playable screen area resource.
//!
//! The play area is a rectangle centred on the origin spanning
//! `[-half_width, half_width] x [-half_height, half_height]` in world units.
//! Spawning, ship relocation and screen wrapping all read it.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use glam::Vec2;

/// Visible play area in world units.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ScreenBounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl ScreenBounds {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            half_width: half_width.abs(),
            half_height: half_height.abs(),
        }
    }

    /// Uniformly random point inside the play area.
    pub fn random_on_screen(&self, rng: &mut Rng) -> Vec2 {
        Vec2::new(
            (rng.f32() * 2.0 - 1.0) * self.half_width,
            (rng.f32() * 2.0 - 1.0) * self.half_height,
        )
    }

    /// The four screen corners.
    pub fn corners(&self) -> [Vec2; 4] {
        let (w, h) = (self.half_width, self.half_height);
        [
            Vec2::new(-w, -h),
            Vec2::new(w, -h),
            Vec2::new(-w, h),
            Vec2::new(w, h),
        ]
    }

    /// Corner with the greatest distance to `from`.
    pub fn farthest_corner(&self, from: Vec2) -> Vec2 {
        self.corners()
            .into_iter()
            .max_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
            .unwrap_or(Vec2::ZERO)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x.abs() <= self.half_width && point.y.abs() <= self.half_height
    }

    /// Map a point that left the area back in from the opposite edge.
    pub fn wrap(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            wrap_axis(point.x, self.half_width),
            wrap_axis(point.y, self.half_height),
        )
    }
}

fn wrap_axis(value: f32, half: f32) -> f32 {
    if half <= 0.0 {
        return 0.0;
    }
    let span = half * 2.0;
    if value > half || value < -half {
        (value + half).rem_euclid(span) - half
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_random_points_stay_on_screen() {
        let bounds = ScreenBounds::new(11.0, 8.0);
        let mut rng = Rng::with_seed(7);
        for _ in 0..500 {
            assert!(bounds.contains(bounds.random_on_screen(&mut rng)));
        }
    }

    #[test]
    fn test_farthest_corner_is_opposite_quadrant() {
        let bounds = ScreenBounds::new(11.0, 8.0);
        assert_eq!(
            bounds.farthest_corner(Vec2::new(3.0, 2.0)),
            Vec2::new(-11.0, -8.0)
        );
        assert_eq!(
            bounds.farthest_corner(Vec2::new(-0.5, -7.0)),
            Vec2::new(11.0, 8.0)
        );
    }

    #[test]
    fn test_wrap_moves_to_opposite_edge() {
        let bounds = ScreenBounds::new(10.0, 5.0);
        let wrapped = bounds.wrap(Vec2::new(10.5, -6.0));
        assert!((wrapped.x - -9.5).abs() < EPSILON);
        assert!((wrapped.y - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_leaves_inside_points_alone() {
        let bounds = ScreenBounds::new(10.0, 5.0);
        let p = Vec2::new(-3.0, 4.9);
        assert_eq!(bounds.wrap(p), p);
    }
}
