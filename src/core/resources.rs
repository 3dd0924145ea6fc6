//! Core domain: shared resources for run configuration, arena bounds, and RNG.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run-level configuration. The seed drives every random decision in the
/// encounter so a run can be replayed exactly.
#[derive(Resource, Debug)]
pub struct EncounterConfig {
    pub seed: u64,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Shared gameplay RNG. Systems borrow this instead of reaching for thread
/// RNG so the encounter stays reproducible per seed.
#[derive(Resource, Debug)]
pub struct EncounterRng(pub ChaCha8Rng);

impl EncounterRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Which lateral third of the arena a position falls in. Used by hazard
/// placement to block the most probable escape axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaThird {
    Left,
    Middle,
    Right,
}

/// Playable area provider, queried by every hazard engine for placement and
/// boundary checks. Origin is the arena center, matching world coordinates.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ArenaBounds {
    pub fn center(&self) -> Vec2 {
        Vec2::ZERO
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.half_extents();
        point.x.abs() <= half.x && point.y.abs() <= half.y
    }

    /// Clamp a point into the arena with the given margin from the edges.
    pub fn clamp_with_margin(&self, point: Vec2, margin: f32) -> Vec2 {
        let half = self.half_extents() - Vec2::splat(margin);
        Vec2::new(
            point.x.clamp(-half.x, half.x),
            point.y.clamp(-half.y, half.y),
        )
    }

    /// The four corner positions, inset by the given margin.
    pub fn corners(&self, margin: f32) -> [Vec2; 4] {
        let half = self.half_extents() - Vec2::splat(margin);
        [
            Vec2::new(-half.x, half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
        ]
    }

    /// Which horizontal third of the arena the x coordinate falls in.
    pub fn lateral_third(&self, x: f32) -> ArenaThird {
        let third = self.width / 3.0;
        let half = self.width * 0.5;
        if x < -half + third {
            ArenaThird::Left
        } else if x > half - third {
            ArenaThird::Right
        } else {
            ArenaThird::Middle
        }
    }

    /// A uniformly random point inside the arena, inset by the margin.
    pub fn random_point(&self, rng: &mut impl Rng, margin: f32) -> Vec2 {
        let half = self.half_extents() - Vec2::splat(margin);
        Vec2::new(
            rng.random_range(-half.x..=half.x),
            rng.random_range(-half.y..=half.y),
        )
    }
}
