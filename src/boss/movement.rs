//! Boss domain: the movement controller.
//!
//! Purely reactive: the scheduler decides the phase, this module turns the
//! phase into steering. No timers live here.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::boss::components::{Boss, BossHealth, BossMovement, MovementMode};
use crate::core::ArenaBounds;
use crate::phases::PhaseScheduler;
use crate::player::Player;

/// Keep the controller's mode in step with the scheduler's phase.
pub(crate) fn sync_movement_mode(
    scheduler: Res<PhaseScheduler>,
    mut query: Query<&mut BossMovement, With<Boss>>,
) {
    let Ok(mut movement) = query.single_mut() else {
        return;
    };
    movement.adjust_for_phase(scheduler.current());
}

/// Hunting: steer toward the player's current position, scaled by
/// aggression so a wounded boss presses harder.
pub(crate) fn hunt_player(
    player_query: Query<&Transform, With<Player>>,
    mut boss_query: Query<
        (&Transform, &mut LinearVelocity, &BossMovement, &BossHealth),
        (With<Boss>, Without<Player>),
    >,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (transform, mut velocity, movement, health) in &mut boss_query {
        if movement.mode != MovementMode::Hunting || !health.active {
            continue;
        }
        let boss_pos = transform.translation.truncate();
        let dir = (player_pos - boss_pos).normalize_or_zero();
        let speed = movement.base_speed * health.aggression() * movement.phase_factor;
        velocity.x = dir.x * speed;
        velocity.y = dir.y * speed;
    }
}

/// Snap the boss to arena center and stop it, leaving z untouched.
pub(crate) fn teleport_to_center(
    bounds: &ArenaBounds,
    transform: &mut Transform,
    velocity: &mut LinearVelocity,
) {
    let center = bounds.center();
    transform.translation.x = center.x;
    transform.translation.y = center.y;
    velocity.x = 0.0;
    velocity.y = 0.0;
}

/// Locked: teleport to arena center and hold velocity at zero every frame.
/// Frozen: zero velocity only; the owning engine moves the boss itself.
pub(crate) fn hold_locked_position(
    bounds: Res<ArenaBounds>,
    mut query: Query<(&mut Transform, &mut LinearVelocity, &BossMovement), With<Boss>>,
) {
    for (mut transform, mut velocity, movement) in &mut query {
        match movement.mode {
            MovementMode::Hunting => {}
            MovementMode::Locked => {
                teleport_to_center(&bounds, &mut transform, &mut velocity);
            }
            MovementMode::Frozen => {
                velocity.x = 0.0;
                velocity.y = 0.0;
            }
        }
    }
}
