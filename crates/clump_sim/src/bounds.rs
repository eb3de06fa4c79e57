//! Play area bounds on the ground plane (x by z).
//!
//! Only the lead player is clamped. Followers receive the lead's post-clamp
//! delta and are never clamped themselves, so a follower can drift outside the
//! area over time. That accumulation is accepted.

use glam::Vec3;
use serde::Deserialize;
use std::ops::Range;

/// Stray spawn range on each axis when no play area is configured.
pub const UNBOUNDED_SPAWN_RANGE: Range<f32> = -10.0..10.0;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(self.width / 2.0, 0.0, self.height / 2.0)
    }

    /// Per-axis clamp: x into `[0, width]`, z into `[0, height]`. The height
    /// axis (y) is left alone and there is no diagonal re-projection.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(0.0, self.width),
            position.y,
            position.z.clamp(0.0, self.height),
        )
    }

    pub fn contains(&self, position: Vec3) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.z)
    }

    pub fn spawn_range_x(&self) -> Range<f32> {
        0.0..self.width
    }

    pub fn spawn_range_z(&self) -> Range<f32> {
        0.0..self.height
    }
}
