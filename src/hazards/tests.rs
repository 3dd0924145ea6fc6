//! Hazards domain: shared placement search tests.

use bevy::prelude::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::resolve_separated_position;
use crate::core::ArenaBounds;

const SEP: f32 = 70.0;

#[test]
fn test_open_field_uses_desired_spot() {
    let bounds = ArenaBounds::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let pos = resolve_separated_position(
        Vec2::new(100.0, 50.0),
        &[],
        SEP,
        10,
        &bounds,
        20.0,
        &mut rng,
    );
    assert_eq!(pos, Some(Vec2::new(100.0, 50.0)));
}

#[test]
fn test_relocation_respects_separation() {
    let bounds = ArenaBounds::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let existing = vec![Vec2::new(100.0, 50.0), Vec2::new(140.0, 60.0)];

    for _ in 0..50 {
        if let Some(pos) = resolve_separated_position(
            Vec2::new(105.0, 52.0),
            &existing,
            SEP,
            10,
            &bounds,
            20.0,
            &mut rng,
        ) {
            for p in &existing {
                assert!(p.distance(pos) >= SEP);
            }
            assert!(bounds.contains(pos));
        }
    }
}

#[test]
fn test_pairwise_separation_holds_as_field_grows() {
    let bounds = ArenaBounds::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut placed: Vec<Vec2> = Vec::new();

    // Keep dropping mines at the same desired spot; every converged
    // placement must stay pairwise separated.
    for _ in 0..30 {
        if let Some(pos) =
            resolve_separated_position(Vec2::ZERO, &placed, SEP, 10, &bounds, 20.0, &mut rng)
        {
            placed.push(pos);
        }
    }

    assert!(placed.len() > 3);
    for (i, a) in placed.iter().enumerate() {
        for b in placed.iter().skip(i + 1) {
            assert!(a.distance(*b) >= SEP, "{a:?} and {b:?} too close");
        }
    }
}

#[test]
fn test_saturated_field_gives_up() {
    let bounds = ArenaBounds {
        width: 100.0,
        height: 100.0,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    // One mine in a tiny arena with a huge separation: nothing fits.
    let existing = vec![Vec2::ZERO];
    let pos = resolve_separated_position(Vec2::ZERO, &existing, 500.0, 10, &bounds, 5.0, &mut rng);
    assert_eq!(pos, None);
}
