//! Hazards domain: shared minimum-separation placement search.

use bevy::prelude::*;
use rand::Rng;

use crate::core::ArenaBounds;

fn far_enough(candidate: Vec2, existing: &[Vec2], min_separation: f32) -> bool {
    existing
        .iter()
        .all(|p| p.distance(candidate) >= min_separation)
}

/// Resolve a spawn position at least `min_separation` away from every
/// existing spawn. The desired spot is tried first; each retry jitters
/// further out, so crowded areas spill toward open space. Returns `None`
/// when the search does not converge within `attempts`; the caller skips
/// the spawn rather than crowding the field.
pub fn resolve_separated_position(
    desired: Vec2,
    existing: &[Vec2],
    min_separation: f32,
    attempts: u32,
    bounds: &ArenaBounds,
    margin: f32,
    rng: &mut impl Rng,
) -> Option<Vec2> {
    let desired = bounds.clamp_with_margin(desired, margin);
    if far_enough(desired, existing, min_separation) {
        return Some(desired);
    }

    for attempt in 1..=attempts {
        let reach = min_separation * (1.0 + attempt as f32 * 0.5);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let candidate = desired + Vec2::from_angle(angle) * rng.random_range(min_separation..reach);
        let candidate = bounds.clamp_with_margin(candidate, margin);
        if far_enough(candidate, existing, min_separation) {
            return Some(candidate);
        }
    }

    None
}
