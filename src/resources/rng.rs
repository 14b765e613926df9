use bevy_ecs::prelude::Resource;
use fastrand::Rng;

/// Seedable random source shared by spawning and relocation.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub Rng);

impl Default for GameRng {
    fn default() -> Self {
        GameRng(Rng::new())
    }
}

impl GameRng {
    pub fn with_seed(seed: u64) -> Self {
        GameRng(Rng::with_seed(seed))
    }

    /// Random f32 in `[min, max]`; returns `min` for an empty range.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let range = max - min;
        if range < f32::EPSILON {
            return min;
        }
        min + self.0.f32() * range
    }

    /// Random angle in radians.
    pub fn angle(&mut self) -> f32 {
        self.0.f32() * std::f32::consts::TAU
    }
}
