//! Player domain: tests for the collaborator surface types.

use super::{InputClaim, PlayerSpeedMod};
use crate::player::components::PlayerHealth;

#[test]
fn test_health_depletion_and_refill() {
    let mut health = PlayerHealth::new(100.0);
    assert_eq!(health.take_damage(30.0), 30.0);
    assert!(!health.is_depleted());
    // Overkill is clamped to what was left.
    assert_eq!(health.take_damage(500.0), 70.0);
    assert!(health.is_depleted());

    health.refill();
    assert_eq!(health.current, 100.0);
}

#[test]
fn test_speed_mod_restore_is_idempotent() {
    let mut speed = PlayerSpeedMod::default();
    speed.set(0.35);
    assert_eq!(speed.factor, 0.35);
    speed.restore();
    speed.restore();
    assert_eq!(speed.factor, 1.0);
}

#[test]
fn test_input_claim_is_exclusive() {
    let mut claim = InputClaim::default();
    assert!(claim.claim("duel"));
    assert!(claim.is_claimed());
    assert_eq!(claim.owner(), Some("duel"));
    // A second claimant is rejected while the first holds the claim.
    assert!(!claim.claim("debug"));

    claim.release();
    assert!(!claim.is_claimed());
    claim.release();
    assert!(claim.claim("debug"));
}
