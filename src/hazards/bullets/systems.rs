//! Bullets engine: emission, projectile advance, and shield pickups.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::Rng;

use crate::boss::Boss;
use crate::core::{ArenaBounds, BulletsTuning, EncounterRng, EncounterTuning};
use crate::encounter::EncounterResetEvent;
use crate::hazards::bullets::components::{BulletsState, PatternKind, Projectile, ShieldPickup};
use crate::hazards::bullets::patterns::{
    aim, cardinal_dirs, diagonal_dirs, jittered, pick_rotation, wall_columns,
};
use crate::hazards::{evict_overflow, resolve_separated_position};
use crate::phases::{Phase, PhaseEndedEvent, PhaseStartedEvent};
use crate::player::{HazardSource, Player, PlayerHitEvent, PlayerShield};
use crate::presentation::PresentationCueEvent;

const PROJECTILE_RADIUS: f32 = 6.0;
const OFFSCREEN_MARGIN: f32 = 60.0;
const SHIELD_RADIUS: f32 = 14.0;
const SHIELD_SEPARATION: f32 = 160.0;

#[allow(clippy::too_many_arguments)]
fn spawn_projectile(
    commands: &mut Commands,
    state: &mut BulletsState,
    tuning: &BulletsTuning,
    pattern: PatternKind,
    position: Vec2,
    velocity: Vec2,
    lifetime: f32,
    piercing: bool,
    color: Color,
) {
    let entity = commands
        .spawn((
            Projectile {
                velocity,
                lifetime,
                pattern,
                piercing,
            },
            Sprite {
                color,
                custom_size: Some(Vec2::splat(PROJECTILE_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.0),
        ))
        .id();
    state.order.push_back(entity);
    evict_overflow(&mut state.order, tuning.max_projectiles, commands);
}

pub(crate) fn arm_bullets(
    mut started: MessageReader<PhaseStartedEvent>,
    tuning: Res<EncounterTuning>,
    mut rng: ResMut<EncounterRng>,
    mut state: ResMut<BulletsState>,
) {
    for event in started.read() {
        if event.phase != Phase::Bullets {
            continue;
        }
        let rotation = pick_rotation(tuning.bullets.rotation_len, &mut rng.0);
        info!(
            "Bullets phase armed: rotation {:?}, duration {:.1}s",
            rotation, event.duration
        );
        state.arm(rotation, event.duration, tuning.bullets.shield_interval);
    }
}

/// Run the active pattern's emitter. Each pattern keeps its own cadence in
/// `emit_timer`; the burst pattern additionally telegraphs before firing.
#[allow(clippy::too_many_arguments)]
pub(crate) fn emit_patterns(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut rng: ResMut<EncounterRng>,
    mut state: ResMut<BulletsState>,
    mut cues: MessageWriter<PresentationCueEvent>,
    player_query: Query<&Transform, With<Player>>,
    boss_query: Query<&Transform, (With<Boss>, Without<Player>)>,
) {
    if !state.active {
        return;
    }
    let (Ok(player_transform), Ok(boss_transform)) =
        (player_query.single(), boss_query.single())
    else {
        return;
    };
    let player_pos = player_transform.translation.truncate();
    let boss_pos = boss_transform.translation.truncate();
    let dt = time.delta_secs();
    let bullets = &tuning.bullets;

    if state.advance_slice(dt) {
        debug!("Bullets rotation advanced to {:?}", state.current_pattern());
    }
    let Some(pattern) = state.current_pattern() else {
        return;
    };

    match pattern {
        PatternKind::Spiral => {
            state.emit_timer -= dt;
            while state.emit_timer <= 0.0 {
                state.emit_timer += bullets.spiral_interval;
                let dir = Vec2::from_angle(state.spiral_angle.to_radians());
                state.spiral_angle += bullets.spiral_step_deg;
                spawn_projectile(
                    &mut commands,
                    &mut state,
                    bullets,
                    pattern,
                    boss_pos,
                    dir * bullets.projectile_speed,
                    bullets.projectile_lifetime,
                    false,
                    Color::srgb(0.9, 0.3, 0.3),
                );
            }
        }
        PatternKind::Wall => {
            state.emit_timer -= dt;
            if state.emit_timer <= 0.0 {
                state.emit_timer = bullets.wall_interval;
                let top = bounds.half_extents().y + PROJECTILE_RADIUS;
                let gap_half = tuning.player.radius + bullets.wall_gap_margin;
                for x in wall_columns(bounds.width, bullets.wall_spacing, player_pos.x, gap_half) {
                    spawn_projectile(
                        &mut commands,
                        &mut state,
                        bullets,
                        pattern,
                        Vec2::new(x, top),
                        Vec2::NEG_Y * bullets.projectile_speed,
                        bullets.projectile_lifetime,
                        false,
                        Color::srgb(0.9, 0.5, 0.2),
                    );
                }
            }
        }
        PatternKind::Cross => {
            state.emit_timer -= dt;
            if state.emit_timer <= 0.0 {
                state.emit_timer = bullets.cross_interval;
                // Two of the four cardinals per volley.
                let skip = rng.0.random_range(0..4usize);
                let skip2 = (skip + 1 + rng.0.random_range(0..3usize)) % 4;
                for (i, dir) in cardinal_dirs().into_iter().enumerate() {
                    if i == skip || i == skip2 {
                        continue;
                    }
                    spawn_projectile(
                        &mut commands,
                        &mut state,
                        bullets,
                        pattern,
                        boss_pos,
                        dir * bullets.projectile_speed,
                        bullets.projectile_lifetime,
                        false,
                        Color::srgb(0.8, 0.3, 0.8),
                    );
                }
                // Occasional full diagonal volley to punish camping.
                if rng.0.random_bool(bullets.diagonal_chance) {
                    for dir in diagonal_dirs() {
                        spawn_projectile(
                            &mut commands,
                            &mut state,
                            bullets,
                            pattern,
                            boss_pos,
                            dir * bullets.projectile_speed,
                            bullets.projectile_lifetime,
                            false,
                            Color::srgb(0.8, 0.3, 0.8),
                        );
                    }
                }
            }
        }
        PatternKind::Rain => {
            state.emit_timer -= dt;
            if state.emit_timer <= 0.0 {
                state.emit_timer = bullets.rain_interval;
                let base = aim(boss_pos, player_pos);
                for _ in 0..bullets.rain_count {
                    let dir = jittered(base, bullets.rain_jitter_deg, &mut rng.0);
                    spawn_projectile(
                        &mut commands,
                        &mut state,
                        bullets,
                        pattern,
                        boss_pos,
                        dir * bullets.projectile_speed,
                        bullets.projectile_lifetime,
                        false,
                        Color::srgb(0.3, 0.6, 0.9),
                    );
                }
            }
        }
        PatternKind::Burst => {
            if state.burst_remaining > 0 {
                state.burst_timer -= dt;
                while state.burst_timer <= 0.0 && state.burst_remaining > 0 {
                    state.burst_timer += bullets.burst_interval;
                    state.burst_remaining -= 1;
                    let dir = aim(boss_pos, player_pos);
                    spawn_projectile(
                        &mut commands,
                        &mut state,
                        bullets,
                        pattern,
                        boss_pos,
                        dir * bullets.burst_speed,
                        bullets.burst_lifetime,
                        true,
                        Color::srgb(1.0, 0.9, 0.2),
                    );
                }
            } else if state.burst_charging {
                state.burst_timer -= dt;
                if state.burst_timer <= 0.0 {
                    state.burst_charging = false;
                    state.burst_remaining = bullets.burst_count;
                    state.burst_timer = 0.0;
                }
            } else {
                // Telegraph before the stream; a visible wind-up is the
                // pattern's only dodge window.
                state.burst_charging = true;
                state.burst_timer = bullets.burst_charge;
                cues.write(PresentationCueEvent::flash(
                    "burst_charge",
                    Color::srgb(1.0, 0.9, 0.2),
                    0.8,
                    boss_pos,
                ));
            }
        }
    }
}

pub(crate) fn spawn_shields(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut rng: ResMut<EncounterRng>,
    mut state: ResMut<BulletsState>,
    shields: Query<&Transform, With<ShieldPickup>>,
) {
    if !state.active {
        return;
    }
    state.shield_timer -= time.delta_secs();
    if state.shield_timer > 0.0 {
        return;
    }
    state.shield_timer = tuning.bullets.shield_interval;

    let existing: Vec<Vec2> = shields.iter().map(|t| t.translation.truncate()).collect();
    let desired = bounds.random_point(&mut rng.0, SHIELD_RADIUS * 2.0);
    let Some(pos) = resolve_separated_position(
        desired,
        &existing,
        SHIELD_SEPARATION,
        tuning.minefield.placement_attempts,
        &bounds,
        SHIELD_RADIUS * 2.0,
        &mut rng.0,
    ) else {
        return;
    };

    commands.spawn((
        ShieldPickup {
            radius: SHIELD_RADIUS,
        },
        Sprite {
            color: Color::srgb(0.3, 0.9, 0.6),
            custom_size: Some(Vec2::splat(SHIELD_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_xyz(pos.x, pos.y, 1.0),
    ));
}

pub(crate) fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    bounds: Res<ArenaBounds>,
    mut state: ResMut<BulletsState>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let cull = bounds.half_extents() + Vec2::splat(OFFSCREEN_MARGIN);
    for (entity, mut projectile, mut transform) in &mut projectiles {
        transform.translation.x += projectile.velocity.x * dt;
        transform.translation.y += projectile.velocity.y * dt;
        projectile.lifetime -= dt;

        let pos = transform.translation.truncate();
        if projectile.lifetime <= 0.0 || pos.x.abs() > cull.x || pos.y.abs() > cull.y {
            state.retire(entity);
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn check_projectile_hits(
    mut commands: Commands,
    tuning: Res<EncounterTuning>,
    mut state: ResMut<BulletsState>,
    mut hits: MessageWriter<PlayerHitEvent>,
    player_query: Query<&Transform, With<Player>>,
    projectiles: Query<(Entity, &Projectile, &Transform), Without<Player>>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();
    let hit_radius = tuning.player.radius + PROJECTILE_RADIUS;

    for (entity, projectile, transform) in projectiles.iter() {
        if transform.translation.truncate().distance(player_pos) >= hit_radius {
            continue;
        }
        hits.write(PlayerHitEvent {
            amount: tuning.bullets.projectile_damage,
            source: HazardSource::Projectile,
        });
        debug!("Player clipped by a {:?} projectile", projectile.pattern);
        if !projectile.piercing {
            state.retire(entity);
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn collect_shields(
    mut commands: Commands,
    tuning: Res<EncounterTuning>,
    mut cues: MessageWriter<PresentationCueEvent>,
    mut player_query: Query<(&Transform, &mut PlayerShield), With<Player>>,
    pickups: Query<(Entity, &ShieldPickup, &Transform), Without<Player>>,
) {
    let Ok((player_transform, mut shield)) = player_query.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (entity, pickup, transform) in pickups.iter() {
        let pos = transform.translation.truncate();
        if pos.distance(player_pos) >= tuning.player.radius + pickup.radius {
            continue;
        }
        shield.timer = tuning.player.shield_duration;
        commands.entity(entity).despawn();
        cues.write(PresentationCueEvent::flash(
            "shield_pickup",
            Color::srgb(0.3, 0.9, 0.6),
            0.6,
            pos,
        ));
        info!("Shield collected: {:.1}s of protection", shield.timer);
    }
}

fn run_cleanup(
    commands: &mut Commands,
    state: &mut BulletsState,
    projectiles: &Query<Entity, With<Projectile>>,
    pickups: &Query<Entity, (With<ShieldPickup>, Without<Projectile>)>,
) {
    if state.cleanup_in_progress {
        return;
    }
    state.cleanup_in_progress = true;
    state.active = false;
    state.rotation.clear();
    state.order.clear();
    for entity in projectiles.iter().chain(pickups.iter()) {
        commands.entity(entity).despawn();
    }
    info!("Bullets phase cleaned up");
}

pub(crate) fn cleanup_bullets(
    mut commands: Commands,
    mut ended: MessageReader<PhaseEndedEvent>,
    mut resets: MessageReader<EncounterResetEvent>,
    mut state: ResMut<BulletsState>,
    projectiles: Query<Entity, With<Projectile>>,
    pickups: Query<Entity, (With<ShieldPickup>, Without<Projectile>)>,
) {
    let phase_over = ended.read().any(|e| e.phase == Phase::Bullets);
    let reset = resets.read().next().is_some();
    if phase_over || reset {
        run_cleanup(&mut commands, &mut state, &projectiles, &pickups);
    }
}

pub(crate) fn teardown_bullets(
    mut commands: Commands,
    mut state: ResMut<BulletsState>,
    projectiles: Query<Entity, With<Projectile>>,
    pickups: Query<Entity, (With<ShieldPickup>, Without<Projectile>)>,
) {
    run_cleanup(&mut commands, &mut state, &projectiles, &pickups);
}
