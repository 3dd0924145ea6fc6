//! Minefield engine: chain planning and engine-state tests.

use bevy::prelude::Vec2;

use super::components::{Mine, MineKind, MinefieldState};
use super::systems::{blast_hits, escape_block_offsets, plan_chain};
use crate::core::ArenaThird;

// -----------------------------------------------------------------------------
// Chain reactions (Scenario C)
// -----------------------------------------------------------------------------

#[test]
fn test_chain_delays_are_strictly_increasing_nearest_first() {
    let mines = [
        (1u32, Vec2::new(100.0, 0.0)),
        (2u32, Vec2::new(50.0, 0.0)),
        (3u32, Vec2::new(75.0, 0.0)),
    ];
    let plan = plan_chain(Vec2::ZERO, &mines, 110.0, 0.12);

    // Nearest first.
    let ids: Vec<u32> = plan.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![2, 3, 1]);

    // Strictly increasing, non-zero delays.
    assert!(plan[0].1 > 0.0);
    for pair in plan.windows(2) {
        assert!(pair[0].1 < pair[1].1);
    }
}

#[test]
fn test_chain_ignores_mines_out_of_radius() {
    let mines = [
        (1u32, Vec2::new(60.0, 0.0)),
        (2u32, Vec2::new(500.0, 0.0)),
    ];
    let plan = plan_chain(Vec2::ZERO, &mines, 110.0, 0.12);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].0, 1);
}

/// Scenario C: a chain of four mines, each within chain radius of the next,
/// cascades fully and leaves the field empty.
#[test]
fn test_four_mine_chain_cascades_to_empty() {
    let mut field: Vec<(u32, Vec2)> = vec![
        (1, Vec2::new(0.0, 0.0)),
        (2, Vec2::new(90.0, 0.0)),
        (3, Vec2::new(180.0, 0.0)),
        (4, Vec2::new(270.0, 0.0)),
    ];
    let chain_radius = 110.0;
    let stagger = 0.12;

    // (id, absolute detonation time), mirroring the engine's pending queue.
    let mut queue: Vec<(u32, f32)> = vec![(1, 0.0)];
    let mut detonation_times: Vec<f32> = Vec::new();

    while let Some(next_idx) = queue
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.1.total_cmp(&b.1.1))
        .map(|(i, _)| i)
    {
        let (id, at) = queue.remove(next_idx);
        let Some(pos_idx) = field.iter().position(|(f, _)| *f == id) else {
            continue; // liveness check: already detonated
        };
        let (_, origin) = field.remove(pos_idx);
        detonation_times.push(at);

        for (caught, delay) in plan_chain(origin, &field, chain_radius, stagger) {
            queue.push((caught, at + delay));
        }
    }

    assert!(field.is_empty(), "all four mines must detonate");
    assert_eq!(detonation_times.len(), 4);
    for pair in detonation_times.windows(2) {
        assert!(pair[0] < pair[1], "delays must be strictly increasing");
    }
    // Bounded: the whole cascade resolves within a handful of staggers.
    assert!(*detonation_times.last().unwrap() <= stagger * 8.0);
}

/// A static mine caught in a chain blasts out to its own smaller radius,
/// not the timed-mine radius.
#[test]
fn test_blast_uses_each_mines_own_radius() {
    let mut world = bevy::prelude::World::new();
    let timed = world.spawn_empty().id();
    let fixed = world.spawn_empty().id();
    let snapshot = vec![
        (timed, Vec2::ZERO, 60.0),
        (fixed, Vec2::new(200.0, 0.0), 40.0),
    ];

    // Player 50 units from the static mine: inside timed range, outside its
    // own.
    let player = Vec2::new(250.0, 0.0);
    assert!(!blast_hits(&snapshot, fixed, player));
    assert!(blast_hits(&snapshot, timed, Vec2::new(50.0, 0.0)));
    assert!(blast_hits(&snapshot, fixed, Vec2::new(235.0, 0.0)));
}

// -----------------------------------------------------------------------------
// Placement targeting
// -----------------------------------------------------------------------------

#[test]
fn test_escape_axis_blocking_by_third() {
    let spread = 84.0;
    // Pinned left: escape is rightward.
    for offset in escape_block_offsets(ArenaThird::Left, spread) {
        assert!(offset.x > 0.0 && offset.y == 0.0);
    }
    // Pinned right: escape is leftward.
    for offset in escape_block_offsets(ArenaThird::Right, spread) {
        assert!(offset.x < 0.0 && offset.y == 0.0);
    }
    // Open middle: escape is vertical.
    let mid = escape_block_offsets(ArenaThird::Middle, spread);
    assert!(mid[0].y > 0.0 && mid[1].y < 0.0);
}

// -----------------------------------------------------------------------------
// Engine state
// -----------------------------------------------------------------------------

#[test]
fn test_mine_kinds() {
    let timed = Mine::timed(5.0, 60.0);
    assert!(matches!(timed.kind, MineKind::Timed { fuse } if fuse == 5.0));
    let fixed = Mine::fixed(40.0);
    assert!(matches!(fixed.kind, MineKind::Static));
    // Static mines use the smaller radius.
    assert!(fixed.danger_radius < timed.danger_radius);
}

#[test]
fn test_blink_flips_on_its_period() {
    let mut mine = Mine::timed(5.0, 60.0);
    assert!(!mine.blink_on);

    // The timer starts spent, so the first tick turns the warning on.
    assert!(mine.advance_blink(0.1, 0.25));
    assert!(mine.blink_on);

    assert!(!mine.advance_blink(0.1, 0.25));
    assert!(mine.blink_on);
    assert!(mine.advance_blink(0.2, 0.25));
    assert!(!mine.blink_on);
}

#[test]
fn test_arm_resets_cleanup_guard() {
    let mut state = MinefieldState::default();
    state.cleanup_in_progress = true;
    state.arm(4.0, 3.0);
    assert!(state.active);
    assert!(!state.cleanup_in_progress);
    assert_eq!(state.hunt_timer, 4.0);
    assert_eq!(state.field_timer, 3.0);
}

#[test]
fn test_retire_is_single_shot() {
    let mut world = bevy::prelude::World::new();
    let mine = world.spawn_empty().id();
    let mut state = MinefieldState::default();
    state.order.push_back(mine);

    assert!(state.is_live(mine));
    assert!(state.retire(mine));
    // Second retire (fuse and contact in the same frame) finds nothing.
    assert!(!state.retire(mine));
    assert!(!state.is_live(mine));
}
