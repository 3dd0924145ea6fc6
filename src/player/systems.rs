//! Player domain: spawn, movement, and damage intake systems.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{ArenaBounds, EncounterTuning, GameState};
use crate::player::components::{
    GameLayer, Player, PlayerHealth, PlayerInvulnerable, PlayerShield,
};
use crate::player::resources::{InputClaim, PlayerLives, PlayerSpeedMod};
use crate::player::{LoseLifeEvent, PlayerDefeatedEvent, PlayerHitEvent};

pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<EncounterTuning>,
    mut lives: ResMut<PlayerLives>,
) {
    lives.remaining = tuning.player.lives;

    commands.spawn((
        Player,
        PlayerHealth::new(tuning.player.max_health),
        PlayerInvulnerable::default(),
        PlayerShield::default(),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::splat(tuning.player.radius * 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -200.0, 0.0),
        (
            RigidBody::Dynamic,
            Collider::circle(tuning.player.radius),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Boss]),
        ),
    ));
}

/// WASD/arrow movement. Skipped while the duel holds the input claim so the
/// ship stands still during selection windows.
pub(crate) fn apply_player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    claim: Res<InputClaim>,
    speed_mod: Res<PlayerSpeedMod>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut query: Query<(&mut LinearVelocity, &mut Transform), With<Player>>,
) {
    let Ok((mut velocity, mut transform)) = query.single_mut() else {
        return;
    };

    if claim.is_claimed() {
        velocity.x = 0.0;
        velocity.y = 0.0;
        return;
    }

    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }

    let speed = tuning.player.move_speed * speed_mod.factor;
    let v = axis.normalize_or_zero() * speed;
    velocity.x = v.x;
    velocity.y = v.y;

    // Keep the ship inside the arena regardless of physics drift.
    let clamped = bounds.clamp_with_margin(transform.translation.truncate(), tuning.player.radius);
    transform.translation.x = clamped.x;
    transform.translation.y = clamped.y;
}

pub(crate) fn tick_player_timers(
    time: Res<Time>,
    mut query: Query<(&mut PlayerInvulnerable, &mut PlayerShield), With<Player>>,
) {
    let dt = time.delta_secs();
    for (mut invuln, mut shield) in &mut query {
        if invuln.timer > 0.0 {
            invuln.timer = (invuln.timer - dt).max(0.0);
        }
        if shield.timer > 0.0 {
            shield.timer = (shield.timer - dt).max(0.0);
        }
    }
}

/// Apply hazard hits, respecting iframes and the shield pickup.
pub(crate) fn apply_player_hits(
    mut hits: MessageReader<PlayerHitEvent>,
    mut life_events: MessageWriter<LoseLifeEvent>,
    tuning: Res<EncounterTuning>,
    mut query: Query<(&mut PlayerHealth, &mut PlayerInvulnerable, &PlayerShield), With<Player>>,
) {
    let Ok((mut health, mut invuln, shield)) = query.single_mut() else {
        return;
    };

    for hit in hits.read() {
        if invuln.is_active() || shield.is_active() {
            continue;
        }

        health.take_damage(hit.amount);
        invuln.timer = tuning.player.iframes;
        debug!(
            "Player hit by {:?} for {:.1}, health {:.1}/{:.1}",
            hit.source, hit.amount, health.current, health.max
        );

        if health.is_depleted() {
            health.refill();
            life_events.write(LoseLifeEvent);
        }
    }
}

pub(crate) fn handle_life_loss(
    mut life_events: MessageReader<LoseLifeEvent>,
    mut defeated: MessageWriter<PlayerDefeatedEvent>,
    mut lives: ResMut<PlayerLives>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for _ in life_events.read() {
        if lives.remaining == 0 {
            continue;
        }
        lives.remaining -= 1;
        info!("Player lost a life, {} remaining", lives.remaining);

        if lives.remaining == 0 {
            defeated.write(PlayerDefeatedEvent);
            next_state.set(GameState::Defeat);
        }
    }
}
