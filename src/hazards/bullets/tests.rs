//! Bullets engine: pattern geometry and engine-state tests.

use bevy::prelude::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::components::{BulletsState, PatternKind, Projectile};
use super::patterns::{aim, jittered, pick_rotation, wall_columns};

// -----------------------------------------------------------------------------
// Pattern geometry
// -----------------------------------------------------------------------------

#[test]
fn test_rotation_has_distinct_patterns() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..50 {
        let rotation = pick_rotation(3, &mut rng);
        assert_eq!(rotation.len(), 3);
        for (i, a) in rotation.iter().enumerate() {
            for b in rotation.iter().skip(i + 1) {
                assert_ne!(a, b, "rotation must not repeat a pattern");
            }
        }
    }
}

#[test]
fn test_rotation_len_is_clamped() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    assert_eq!(pick_rotation(0, &mut rng).len(), 1);
    assert_eq!(pick_rotation(99, &mut rng).len(), PatternKind::ALL.len());
}

/// The wall always leaves a gap around the player's lateral position.
#[test]
fn test_wall_gap_is_dodgeable() {
    for gap_center in [-600.0, -123.5, 0.0, 321.0, 600.0] {
        let columns = wall_columns(1280.0, 48.0, gap_center, 48.0);
        assert!(!columns.is_empty());
        for x in &columns {
            assert!((x - gap_center).abs() > 48.0);
            assert!(x.abs() < 640.0);
        }
    }
}

#[test]
fn test_wall_without_gap_spans_the_edge() {
    // Gap pushed far off-screen: the row covers the full width.
    let columns = wall_columns(1280.0, 48.0, 10_000.0, 48.0);
    let expected = (1280.0_f32 / 48.0).floor() as usize;
    assert!(columns.len() >= expected - 1);
}

#[test]
fn test_aim_handles_degenerate_direction() {
    let dir = aim(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
    assert!((dir.length() - 1.0).abs() < 1e-5);
}

#[test]
fn test_jitter_stays_within_cone() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let base = Vec2::NEG_Y;
    for _ in 0..200 {
        let dir = jittered(base, 14.0, &mut rng);
        assert!((dir.length() - 1.0).abs() < 1e-4);
        let angle = base.angle_to(dir).abs();
        assert!(angle <= 14.0_f32.to_radians() + 1e-4);
    }
}

// -----------------------------------------------------------------------------
// Engine state
// -----------------------------------------------------------------------------

#[test]
fn test_rotation_slices_split_the_phase_evenly() {
    let mut state = BulletsState::default();
    state.arm(vec![PatternKind::Spiral, PatternKind::Rain], 90.0, 12.0);
    assert_eq!(state.current_pattern(), Some(PatternKind::Spiral));
    assert_eq!(state.slice_duration, 45.0);

    assert!(!state.advance_slice(44.9));
    assert!(state.advance_slice(0.2));
    assert_eq!(state.current_pattern(), Some(PatternKind::Rain));

    // The last slice never rotates off the end.
    assert!(!state.advance_slice(1000.0));
    assert_eq!(state.current_pattern(), Some(PatternKind::Rain));
}

#[test]
fn test_single_pattern_run_never_rotates() {
    let mut state = BulletsState::default();
    state.arm(vec![PatternKind::Burst], 90.0, 12.0);
    assert!(!state.advance_slice(1000.0));
    assert_eq!(state.current_pattern(), Some(PatternKind::Burst));
}

#[test]
fn test_slice_rotation_resets_pattern_state() {
    let mut state = BulletsState::default();
    state.arm(vec![PatternKind::Burst, PatternKind::Spiral], 10.0, 12.0);
    state.burst_charging = true;
    state.burst_remaining = 7;
    state.spiral_angle = 123.0;

    assert!(state.advance_slice(5.1));
    assert!(!state.burst_charging);
    assert_eq!(state.burst_remaining, 0);
    assert_eq!(state.spiral_angle, 0.0);
}

#[test]
fn test_arm_resets_cleanup_guard() {
    let mut state = BulletsState::default();
    state.cleanup_in_progress = true;
    state.arm(vec![PatternKind::Wall], 45.0, 12.0);
    assert!(state.active);
    assert!(!state.cleanup_in_progress);
    assert_eq!(state.shield_timer, 12.0);
}

#[test]
fn test_projectile_keeps_its_origin_pattern() {
    let mut world = bevy::prelude::World::new();
    let shot = world
        .spawn(Projectile {
            velocity: Vec2::NEG_Y * 300.0,
            lifetime: 4.0,
            pattern: PatternKind::Wall,
            piercing: false,
        })
        .id();

    let projectile = world.get::<Projectile>(shot).unwrap();
    assert_eq!(projectile.pattern, PatternKind::Wall);
    assert!(!projectile.piercing);
}

#[test]
fn test_retire_is_single_shot() {
    let mut world = bevy::prelude::World::new();
    let shot = world.spawn_empty().id();
    let mut state = BulletsState::default();
    state.order.push_back(shot);

    assert!(state.retire(shot));
    assert!(!state.retire(shot));
}
