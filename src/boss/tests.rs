//! Boss domain: damage model and movement controller tests.

use avian2d::prelude::LinearVelocity;
use bevy::prelude::{Transform, Vec2};

use super::components::{BossHealth, BossMovement, Immunity, MovementMode};
use super::damage::{crossed_thresholds, resolve_regular_damage};
use super::movement::teleport_to_center;
use crate::core::ArenaBounds;
use crate::phases::Phase;

// -----------------------------------------------------------------------------
// Damage scaling (Scenario A)
// -----------------------------------------------------------------------------

#[test]
fn test_regular_damage_is_scaled_and_floored() {
    assert_eq!(resolve_regular_damage(100.0, 0.4), 40.0);
    assert_eq!(resolve_regular_damage(101.0, 0.4), 40.0);
    assert_eq!(resolve_regular_damage(1.0, 0.4), 0.0);
}

#[test]
fn test_ten_scaled_hits_drop_health_by_400() {
    let mut health = BossHealth::new(2000.0);
    for _ in 0..10 {
        let applied = health.deplete(resolve_regular_damage(100.0, 0.4));
        assert_eq!(applied, 40.0);
    }
    assert_eq!(health.current, 1600.0);
}

#[test]
fn test_deplete_clamps_at_zero() {
    let mut health = BossHealth::new(50.0);
    assert_eq!(health.deplete(80.0), 50.0);
    assert!(health.is_dead());
    assert_eq!(health.fraction(), 0.0);
}

// -----------------------------------------------------------------------------
// Immunity window
// -----------------------------------------------------------------------------

#[test]
fn test_immunity_window_expires() {
    let mut immunity = Immunity::default();
    assert!(!immunity.is_immune());

    immunity.make_immune(2.0);
    assert!(immunity.is_immune());

    immunity.tick(1.5);
    assert!(immunity.is_immune());
    immunity.tick(1.0);
    assert!(!immunity.is_immune());
}

#[test]
fn test_make_immune_never_shortens() {
    let mut immunity = Immunity::default();
    immunity.make_immune(5.0);
    immunity.make_immune(1.0);
    assert_eq!(immunity.timer, 5.0);
}

#[test]
fn test_forced_immunity_ignores_timer() {
    let mut immunity = Immunity {
        timer: 0.0,
        forced: true,
    };
    assert!(immunity.is_immune());
    immunity.forced = false;
    assert!(!immunity.is_immune());
}

// -----------------------------------------------------------------------------
// Threshold crossings
// -----------------------------------------------------------------------------

#[test]
fn test_threshold_crossing_detection() {
    let thresholds = [0.6, 0.3, 0.15];
    assert_eq!(crossed_thresholds(0.7, 0.55, &thresholds), vec![0.6]);
    // One big hit can cross several at once.
    assert_eq!(
        crossed_thresholds(0.7, 0.1, &thresholds),
        vec![0.6, 0.3, 0.15]
    );
    // Already below: no re-notification.
    assert!(crossed_thresholds(0.55, 0.5, &thresholds).is_empty());
    // Landing exactly on a threshold counts as crossing it.
    assert_eq!(crossed_thresholds(0.35, 0.3, &thresholds), vec![0.3]);
}

#[test]
fn test_aggression_scales_with_missing_health() {
    let mut health = BossHealth::new(1000.0);
    assert_eq!(health.aggression(), 1.0);
    health.deplete(500.0);
    assert_eq!(health.aggression(), 1.5);
    health.deplete(500.0);
    assert_eq!(health.aggression(), 2.0);
}

// -----------------------------------------------------------------------------
// Movement controller round-trip
// -----------------------------------------------------------------------------

#[test]
fn test_lock_then_hunting_round_trip() {
    let mut movement = BossMovement::new(140.0);
    movement.adjust_for_phase(Phase::Hunting);
    let factor_before = movement.phase_factor;
    assert_eq!(movement.mode, MovementMode::Hunting);

    movement.lock_and_center();
    assert_eq!(movement.mode, MovementMode::Locked);

    movement.enable_hunting();
    movement.adjust_for_phase(Phase::Hunting);
    assert_eq!(movement.mode, MovementMode::Hunting);
    assert_eq!(movement.phase_factor, factor_before);
}

#[test]
fn test_teleport_to_center_snaps_and_stops() {
    let bounds = ArenaBounds::default();
    let mut transform = Transform::from_xyz(300.0, -180.0, 1.0);
    let mut velocity = LinearVelocity(Vec2::new(120.0, -60.0));

    teleport_to_center(&bounds, &mut transform, &mut velocity);
    assert_eq!(transform.translation.truncate(), bounds.center());
    assert_eq!(velocity.0, Vec2::ZERO);
    assert_eq!(transform.translation.z, 1.0);
}

#[test]
fn test_engine_driven_phases_freeze_not_center() {
    let mut movement = BossMovement::new(140.0);
    for phase in [Phase::Minefield, Phase::PathTrace] {
        movement.adjust_for_phase(phase);
        assert_eq!(movement.mode, MovementMode::Frozen);
    }
    for phase in [Phase::Summoning, Phase::Bullets, Phase::Duel] {
        movement.adjust_for_phase(phase);
        assert_eq!(movement.mode, MovementMode::Locked);
    }
}
