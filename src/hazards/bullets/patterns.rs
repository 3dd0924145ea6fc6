//! Bullets engine: pure pattern geometry, kept free of ECS access so the
//! dodgeability properties are testable.

use bevy::prelude::*;
use rand::Rng;

use crate::hazards::bullets::components::PatternKind;

/// Pick `len` distinct patterns for one run of the phase.
pub fn pick_rotation(len: usize, rng: &mut impl Rng) -> Vec<PatternKind> {
    let mut pool = PatternKind::ALL.to_vec();
    let len = len.clamp(1, pool.len());
    let mut rotation = Vec::with_capacity(len);
    for _ in 0..len {
        let idx = rng.random_range(0..pool.len());
        rotation.push(pool.swap_remove(idx));
    }
    rotation
}

/// Column positions for one wall volley across an edge of width `width`,
/// leaving a gap of `gap_half_width` on each side of `gap_center` so the
/// wall is always dodgeable from the player's lateral position.
pub fn wall_columns(width: f32, spacing: f32, gap_center: f32, gap_half_width: f32) -> Vec<f32> {
    let half = width / 2.0;
    let mut columns = Vec::new();
    let mut x = -half + spacing / 2.0;
    while x < half {
        if (x - gap_center).abs() > gap_half_width {
            columns.push(x);
        }
        x += spacing;
    }
    columns
}

/// Unit direction from `from` toward `to`; straight down when degenerate.
pub fn aim(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::NEG_Y)
}

/// Rotate a direction by a uniform random angle within `±jitter_deg`.
pub fn jittered(dir: Vec2, jitter_deg: f32, rng: &mut impl Rng) -> Vec2 {
    let jitter = jitter_deg.to_radians();
    let angle = rng.random_range(-jitter..=jitter);
    Vec2::from_angle(angle).rotate(dir)
}

pub fn cardinal_dirs() -> [Vec2; 4] {
    [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y]
}

pub fn diagonal_dirs() -> [Vec2; 4] {
    let d = std::f32::consts::FRAC_1_SQRT_2;
    [
        Vec2::new(d, d),
        Vec2::new(d, -d),
        Vec2::new(-d, d),
        Vec2::new(-d, -d),
    ]
}
