//! Path-trace engine: waypoint generators. Every shape touches the arena
//! walls so the trail cuts the whole playfield, not just the middle.

use bevy::prelude::*;
use rand::Rng;

use crate::core::ArenaBounds;

/// Inset from the walls so the boss sprite stays on screen while touching.
const WALL_INSET: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Zigzag,
    Star,
    LetterN,
    LetterZ,
    /// Randomized corner-to-corner polyline.
    CornerRun,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Zigzag,
        ShapeKind::Star,
        ShapeKind::LetterN,
        ShapeKind::LetterZ,
        ShapeKind::CornerRun,
    ];
}

pub fn pick_shape(rng: &mut impl Rng) -> ShapeKind {
    ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())]
}

pub fn waypoints(kind: ShapeKind, bounds: &ArenaBounds, rng: &mut impl Rng) -> Vec<Vec2> {
    match kind {
        ShapeKind::Zigzag => zigzag(bounds),
        ShapeKind::Star => star(bounds),
        ShapeKind::LetterN => letter_n(bounds),
        ShapeKind::LetterZ => letter_z(bounds),
        ShapeKind::CornerRun => corner_run(bounds, rng),
    }
}

/// Left-to-right zigzag bouncing between top and bottom walls.
fn zigzag(bounds: &ArenaBounds) -> Vec<Vec2> {
    let half = bounds.half_extents() - Vec2::splat(WALL_INSET);
    let peaks = 5;
    let mut points = Vec::with_capacity(peaks + 1);
    for i in 0..=peaks {
        let t = i as f32 / peaks as f32;
        let x = -half.x + t * half.x * 2.0;
        let y = if i % 2 == 0 { -half.y } else { half.y };
        points.push(Vec2::new(x, y));
    }
    points
}

/// Five-pointed star inscribed in the arena, drawn in stride-2 order so
/// consecutive waypoints cross the middle.
fn star(bounds: &ArenaBounds) -> Vec<Vec2> {
    let half = bounds.half_extents() - Vec2::splat(WALL_INSET);
    let mut points = Vec::with_capacity(6);
    for i in 0..5u32 {
        let vertex = (i * 2) % 5;
        let angle = std::f32::consts::FRAC_PI_2 + vertex as f32 * std::f32::consts::TAU / 5.0;
        points.push(Vec2::new(angle.cos() * half.x, angle.sin() * half.y));
    }
    // Close the star.
    points.push(points[0]);
    points
}

fn letter_n(bounds: &ArenaBounds) -> Vec<Vec2> {
    let half = bounds.half_extents() - Vec2::splat(WALL_INSET);
    vec![
        Vec2::new(-half.x, -half.y),
        Vec2::new(-half.x, half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
    ]
}

fn letter_z(bounds: &ArenaBounds) -> Vec<Vec2> {
    let half = bounds.half_extents() - Vec2::splat(WALL_INSET);
    vec![
        Vec2::new(-half.x, half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
    ]
}

/// Corner-to-corner polyline over a random corner order, never revisiting
/// the corner it just left.
fn corner_run(bounds: &ArenaBounds, rng: &mut impl Rng) -> Vec<Vec2> {
    let corners = bounds.corners(WALL_INSET);
    let hops = rng.random_range(4..=6usize);
    let mut current = rng.random_range(0..corners.len());
    let mut points = vec![corners[current]];
    for _ in 0..hops {
        let step = rng.random_range(1..corners.len());
        current = (current + step) % corners.len();
        points.push(corners[current]);
    }
    points
}
