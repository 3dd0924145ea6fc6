//! Path-trace engine: shape geometry and round-state tests.

use bevy::prelude::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::components::{PathTraceState, TraceStage};
use super::shapes::{waypoints, ShapeKind};
use crate::core::ArenaBounds;

fn bounds() -> ArenaBounds {
    ArenaBounds::default()
}

// -----------------------------------------------------------------------------
// Shape geometry
// -----------------------------------------------------------------------------

/// Every shape stays inside the arena and reaches out to the walls.
#[test]
fn test_shapes_are_wall_touching_and_in_bounds() {
    let bounds = bounds();
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let near = 30.0;

    for kind in ShapeKind::ALL {
        let points = waypoints(kind, &bounds, &mut rng);
        assert!(points.len() >= 2, "{kind:?} needs at least one segment");
        for p in &points {
            assert!(bounds.contains(*p), "{kind:?} waypoint {p} out of bounds");
        }
        let half = bounds.half_extents();
        let touches = points
            .iter()
            .any(|p| p.x.abs() > half.x - near || p.y.abs() > half.y - near);
        assert!(touches, "{kind:?} never approaches a wall");
    }
}

#[test]
fn test_zigzag_alternates_walls() {
    let bounds = bounds();
    let mut rng = ChaCha8Rng::seed_from_u64(22);
    let points = waypoints(ShapeKind::Zigzag, &bounds, &mut rng);
    for pair in points.windows(2) {
        assert!(
            (pair[0].y > 0.0) != (pair[1].y > 0.0),
            "zigzag must bounce between top and bottom"
        );
        assert!(pair[1].x > pair[0].x, "zigzag runs left to right");
    }
}

#[test]
fn test_corner_run_never_repeats_a_corner() {
    let bounds = bounds();
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    for _ in 0..50 {
        let points = waypoints(ShapeKind::CornerRun, &bounds, &mut rng);
        for pair in points.windows(2) {
            assert!(
                pair[0].distance(pair[1]) > 1.0,
                "consecutive corners must differ"
            );
        }
    }
}

#[test]
fn test_star_crosses_the_middle() {
    let bounds = bounds();
    let mut rng = ChaCha8Rng::seed_from_u64(24);
    let points = waypoints(ShapeKind::Star, &bounds, &mut rng);
    assert_eq!(points.first(), points.last(), "star path is closed");
    // Stride-2 ordering makes every segment pass near the center.
    for pair in points.windows(2) {
        let mid = (pair[0] + pair[1]) / 2.0;
        assert!(mid.length() < bounds.half_extents().length() * 0.5);
    }
}

// -----------------------------------------------------------------------------
// Round state
// -----------------------------------------------------------------------------

#[test]
fn test_round_speed_steps_up_every_three_rounds() {
    let mut state = PathTraceState::default();
    let speed = |state: &PathTraceState| state.round_speed(260.0, 40.0, 3);

    assert_eq!(speed(&state), 260.0);
    state.round = 2;
    assert_eq!(speed(&state), 260.0);
    state.round = 3;
    assert_eq!(speed(&state), 300.0);
    state.round = 9;
    assert_eq!(speed(&state), 380.0);
}

#[test]
fn test_arm_resets_everything() {
    let mut state = PathTraceState {
        round: 7,
        stage: TraceStage::Traversal,
        cleanup_in_progress: true,
        last_trail_pos: Some(Vec2::ONE),
        ..PathTraceState::default()
    };
    state.arm(10, 6.0);
    assert!(state.active);
    assert!(!state.cleanup_in_progress);
    assert_eq!(state.round, 0);
    assert_eq!(state.rounds_target, 10);
    assert_eq!(state.stage, TraceStage::Idle);
    assert_eq!(state.grid_timer, 6.0);
    assert!(state.last_trail_pos.is_none());
}

#[test]
fn test_arm_never_targets_zero_rounds() {
    let mut state = PathTraceState::default();
    state.arm(0, 6.0);
    assert_eq!(state.rounds_target, 1);
}
