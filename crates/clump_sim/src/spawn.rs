//! Injected randomness for stray placement.

use clump_core::rng::GameRng;
use glam::Vec3;
use std::ops::Range;

use crate::bounds::{PlayArea, UNBOUNDED_SPAWN_RANGE};

/// Source of spawn coordinates. Production uses `GameRng`; tests script exact spots.
pub trait SpawnSource {
    /// A value in `[range.start, range.end)`.
    fn sample(&mut self, range: Range<f32>) -> f32;
}

impl SpawnSource for GameRng {
    fn sample(&mut self, range: Range<f32>) -> f32 {
        self.gen_range_f32(range)
    }
}

/// Ground-plane spawn point: x is drawn before z.
pub fn spawn_point(source: &mut dyn SpawnSource, area: Option<&PlayArea>) -> Vec3 {
    let (range_x, range_z) = match area {
        Some(area) => (area.spawn_range_x(), area.spawn_range_z()),
        None => (UNBOUNDED_SPAWN_RANGE, UNBOUNDED_SPAWN_RANGE),
    };
    let x = source.sample(range_x);
    let z = source.sample(range_z);
    Vec3::new(x, 0.0, z)
}
