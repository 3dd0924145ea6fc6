//! Minefield engine: generation cycles, detonation, and chain reactions.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::Rng;

use crate::boss::Boss;
use crate::core::{ArenaBounds, ArenaThird, EncounterRng, EncounterTuning, MinefieldTuning};
use crate::encounter::EncounterResetEvent;
use crate::hazards::minefield::components::{Mine, MineKind, MinefieldState, PendingDetonation};
use crate::hazards::{evict_overflow, resolve_separated_position};
use crate::phases::{Phase, PhaseEndedEvent, PhaseStartedEvent};
use crate::player::{HazardSource, Player, PlayerHitEvent};
use crate::presentation::PresentationCueEvent;

/// Mines within chain radius of a detonation, nearest first, each with a
/// strictly increasing stagger delay. Staggering avoids the whole chain
/// resolving inside one frame.
pub(crate) fn plan_chain<I: Copy>(
    origin: Vec2,
    mines: &[(I, Vec2)],
    chain_radius: f32,
    stagger: f32,
) -> Vec<(I, f32)> {
    let mut caught: Vec<(I, f32)> = mines
        .iter()
        .filter(|(_, pos)| pos.distance(origin) <= chain_radius)
        .map(|(id, pos)| (*id, pos.distance(origin)))
        .collect();
    caught.sort_by(|a, b| a.1.total_cmp(&b.1));
    caught
        .into_iter()
        .enumerate()
        .map(|(i, (id, _))| (id, stagger * (i + 1) as f32))
        .collect()
}

/// Offsets from the player that block the most probable escape axis: pushed
/// against a side wall the player escapes laterally, in the open middle they
/// escape vertically.
pub(crate) fn escape_block_offsets(third: ArenaThird, spread: f32) -> [Vec2; 2] {
    match third {
        ArenaThird::Left => [Vec2::new(spread, 0.0), Vec2::new(spread * 1.8, 0.0)],
        ArenaThird::Right => [Vec2::new(-spread, 0.0), Vec2::new(-spread * 1.8, 0.0)],
        ArenaThird::Middle => [Vec2::new(0.0, spread), Vec2::new(0.0, -spread)],
    }
}

fn mine_positions(query: &Query<(Entity, &Mine, &Transform)>) -> Vec<(Entity, Vec2)> {
    query
        .iter()
        .map(|(entity, _, transform)| (entity, transform.translation.truncate()))
        .collect()
}

/// Per-mine detonation snapshot: position plus the mine's own blast radius.
fn mine_snapshot(query: &Query<(Entity, &Mine, &Transform)>) -> Vec<(Entity, Vec2, f32)> {
    query
        .iter()
        .map(|(entity, mine, transform)| {
            (entity, transform.translation.truncate(), mine.danger_radius)
        })
        .collect()
}

/// Whether the blast from `mine` reaches the player. Each mine damages out
/// to its own danger radius, so a static mine caught in a chain never hits
/// at timed-mine range.
pub(crate) fn blast_hits(
    snapshot: &[(Entity, Vec2, f32)],
    mine: Entity,
    player_pos: Vec2,
) -> bool {
    snapshot
        .iter()
        .find(|(e, _, _)| *e == mine)
        .is_some_and(|(_, origin, radius)| origin.distance(player_pos) < *radius)
}

fn spawn_mine(
    commands: &mut Commands,
    state: &mut MinefieldState,
    desired: Vec2,
    mine: Mine,
    tuning: &MinefieldTuning,
    bounds: &ArenaBounds,
    existing: &mut Vec<(Entity, Vec2)>,
    rng: &mut impl Rng,
) {
    let taken: Vec<Vec2> = existing.iter().map(|(_, p)| *p).collect();
    let Some(pos) = resolve_separated_position(
        desired,
        &taken,
        tuning.min_separation,
        tuning.placement_attempts,
        bounds,
        tuning.static_danger_radius,
        rng,
    ) else {
        debug!("Mine placement at {:?} did not converge, skipped", desired);
        return;
    };

    let color = match mine.kind {
        MineKind::Timed { .. } => Color::srgb(0.9, 0.4, 0.1),
        MineKind::Static => Color::srgb(0.7, 0.1, 0.1),
    };
    let radius = mine.danger_radius;
    let entity = commands
        .spawn((
            mine,
            Sprite {
                color,
                custom_size: Some(Vec2::splat(radius * 0.6)),
                ..default()
            },
            Transform::from_xyz(pos.x, pos.y, 0.5),
        ))
        .id();

    state.order.push_back(entity);
    existing.push((entity, pos));
    evict_overflow(&mut state.order, tuning.max_mines, commands);
}

/// Detonate one mine: despawn it, hurt the player if inside the blast, and
/// queue every mine caught in the chain radius.
#[allow(clippy::too_many_arguments)]
fn detonate(
    mine: Entity,
    commands: &mut Commands,
    state: &mut MinefieldState,
    all: &[(Entity, Vec2, f32)],
    player_pos: Option<Vec2>,
    tuning: &MinefieldTuning,
    hits: &mut MessageWriter<PlayerHitEvent>,
    cues: &mut MessageWriter<PresentationCueEvent>,
) {
    // Already retired this frame (double trigger): nothing to do.
    if !state.retire(mine) {
        return;
    }
    let Some((_, origin, _)) = all.iter().find(|(e, _, _)| *e == mine) else {
        return;
    };
    let origin = *origin;

    commands.entity(mine).despawn();
    cues.write(PresentationCueEvent::flash(
        "mine_explosion",
        Color::srgb(1.0, 0.6, 0.1),
        1.0,
        origin,
    ));

    if player_pos.is_some_and(|p| blast_hits(all, mine, p)) {
        hits.write(PlayerHitEvent {
            amount: tuning.contact_damage,
            source: HazardSource::Mine,
        });
    }

    let live: Vec<(Entity, Vec2)> = all
        .iter()
        .filter(|(e, _, _)| *e != mine && state.is_live(*e))
        .map(|(e, p, _)| (*e, *p))
        .collect();
    for (entity, delay) in plan_chain(origin, &live, tuning.chain_radius, tuning.chain_stagger) {
        let already_queued = state.pending.iter().any(|p| p.mine == entity);
        if !already_queued {
            state.pending.push(PendingDetonation {
                delay,
                mine: entity,
            });
        }
    }
}

pub(crate) fn arm_minefield(
    mut started: MessageReader<PhaseStartedEvent>,
    tuning: Res<EncounterTuning>,
    mut state: ResMut<MinefieldState>,
) {
    for event in started.read() {
        if event.phase == Phase::Minefield {
            state.arm(tuning.minefield.hunt_interval, tuning.minefield.field_interval);
            info!("Minefield engine armed (filler: {})", event.filler);
        }
    }
}

/// Cycle (a): every interval, relocate the boss next to the player and mine
/// both the vacated spot and the player's surroundings.
pub(crate) fn hunt_teleport_cycle(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut rng: ResMut<EncounterRng>,
    mut state: ResMut<MinefieldState>,
    mut cues: MessageWriter<PresentationCueEvent>,
    player_query: Query<&Transform, With<Player>>,
    mut boss_query: Query<&mut Transform, (With<Boss>, Without<Player>)>,
    mines: Query<(Entity, &Mine, &Transform)>,
) {
    if !state.active {
        return;
    }
    state.hunt_timer -= time.delta_secs();
    if state.hunt_timer > 0.0 {
        return;
    }
    state.hunt_timer = tuning.minefield.hunt_interval;

    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let Ok(mut boss_transform) = boss_query.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();
    let vacated = boss_transform.translation.truncate();

    let angle = rng.0.random_range(0.0..std::f32::consts::TAU);
    let target = bounds.clamp_with_margin(
        player_pos + Vec2::from_angle(angle) * tuning.minefield.hunt_offset,
        tuning.boss.radius,
    );
    boss_transform.translation.x = target.x;
    boss_transform.translation.y = target.y;
    cues.write(PresentationCueEvent::flash(
        "boss_teleport",
        Color::srgb(0.6, 0.2, 0.9),
        0.7,
        target,
    ));

    let mut existing = mine_positions(&mines);
    let fuse = tuning.minefield.timed_fuse;
    let radius = tuning.minefield.timed_danger_radius;
    for desired in [vacated, player_pos] {
        spawn_mine(
            &mut commands,
            &mut state,
            desired,
            Mine::timed(fuse, radius),
            &tuning.minefield,
            &bounds,
            &mut existing,
            &mut rng.0,
        );
    }
}

/// Cycle (b): every interval, drop a handful of permanent mines around the
/// player's last known position, blocking the likely escape axis, with an
/// occasional seed in each arena corner.
pub(crate) fn static_field_cycle(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut rng: ResMut<EncounterRng>,
    mut state: ResMut<MinefieldState>,
    player_query: Query<&Transform, With<Player>>,
    mines: Query<(Entity, &Mine, &Transform)>,
) {
    if !state.active {
        return;
    }
    state.field_timer -= time.delta_secs();
    if state.field_timer > 0.0 {
        return;
    }
    state.field_timer = tuning.minefield.field_interval;

    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    let count = rng
        .0
        .random_range(tuning.minefield.field_min..=tuning.minefield.field_max);
    let offsets = escape_block_offsets(
        bounds.lateral_third(player_pos.x),
        tuning.minefield.min_separation * 1.2,
    );

    let mut existing = mine_positions(&mines);
    let radius = tuning.minefield.static_danger_radius;
    for i in 0..count {
        // First mine sits on the player's position, the rest block escapes.
        let desired = if i == 0 {
            player_pos
        } else {
            player_pos + offsets[(i as usize - 1) % offsets.len()]
        };
        spawn_mine(
            &mut commands,
            &mut state,
            desired,
            Mine::fixed(radius),
            &tuning.minefield,
            &bounds,
            &mut existing,
            &mut rng.0,
        );
    }

    if rng.0.random_bool(tuning.minefield.corner_chance) {
        for corner in bounds.corners(radius * 2.0) {
            spawn_mine(
                &mut commands,
                &mut state,
                corner,
                Mine::fixed(radius),
                &tuning.minefield,
                &bounds,
                &mut existing,
                &mut rng.0,
            );
        }
    }
}

/// Fuse countdown and blink warning; detonate timed mines whose fuse ran out.
pub(crate) fn tick_mines(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    mut state: ResMut<MinefieldState>,
    mut hits: MessageWriter<PlayerHitEvent>,
    mut cues: MessageWriter<PresentationCueEvent>,
    player_query: Query<&Transform, With<Player>>,
    mut mines: Query<(Entity, &mut Mine, &Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    let mut due: Vec<Entity> = Vec::new();

    for (entity, mut mine, _, mut sprite) in &mut mines {
        if mine.advance_blink(dt, tuning.minefield.blink_period) {
            let alpha = if mine.blink_on { 1.0 } else { 0.45 };
            sprite.color = sprite.color.with_alpha(alpha);
        }
        if let MineKind::Timed { fuse } = &mut mine.kind {
            *fuse -= dt;
            if *fuse <= 0.0 {
                due.push(entity);
            }
        }
    }

    if due.is_empty() {
        return;
    }
    let all: Vec<(Entity, Vec2, f32)> = mines
        .iter()
        .map(|(e, m, t, _)| (e, t.translation.truncate(), m.danger_radius))
        .collect();
    let player_pos = player_query
        .single()
        .ok()
        .map(|t| t.translation.truncate());
    for entity in due {
        detonate(
            entity,
            &mut commands,
            &mut state,
            &all,
            player_pos,
            &tuning.minefield,
            &mut hits,
            &mut cues,
        );
    }
}

/// Contact check: stepping inside a mine's danger radius detonates it.
pub(crate) fn check_mine_contact(
    mut commands: Commands,
    tuning: Res<EncounterTuning>,
    mut state: ResMut<MinefieldState>,
    mut hits: MessageWriter<PlayerHitEvent>,
    mut cues: MessageWriter<PresentationCueEvent>,
    player_query: Query<&Transform, With<Player>>,
    mines: Query<(Entity, &Mine, &Transform)>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    let touched: Vec<Entity> = mines
        .iter()
        .filter(|(entity, mine, transform)| {
            state.is_live(*entity)
                && player_pos.distance(transform.translation.truncate()) < mine.danger_radius
        })
        .map(|(entity, _, _)| entity)
        .collect();
    if touched.is_empty() {
        return;
    }

    let all = mine_snapshot(&mines);
    for entity in touched {
        detonate(
            entity,
            &mut commands,
            &mut state,
            &all,
            Some(player_pos),
            &tuning.minefield,
            &mut hits,
            &mut cues,
        );
    }
}

/// Fire chain-reaction detonations whose stagger delay has elapsed. Each
/// target is liveness-checked so stale entries no-op.
pub(crate) fn process_pending_detonations(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    mut state: ResMut<MinefieldState>,
    mut hits: MessageWriter<PlayerHitEvent>,
    mut cues: MessageWriter<PresentationCueEvent>,
    player_query: Query<&Transform, With<Player>>,
    mines: Query<(Entity, &Mine, &Transform)>,
) {
    if state.pending.is_empty() {
        return;
    }
    let dt = time.delta_secs();
    for p in &mut state.pending {
        p.delay -= dt;
    }

    let due: Vec<Entity> = state
        .pending
        .iter()
        .filter(|p| p.delay <= 0.0)
        .map(|p| p.mine)
        .collect();
    state.pending.retain(|p| p.delay > 0.0);

    if due.is_empty() {
        return;
    }
    let all = mine_snapshot(&mines);
    let player_pos = player_query
        .single()
        .ok()
        .map(|t| t.translation.truncate());
    for entity in due {
        if !state.is_live(entity) {
            continue;
        }
        detonate(
            entity,
            &mut commands,
            &mut state,
            &all,
            player_pos,
            &tuning.minefield,
            &mut hits,
            &mut cues,
        );
    }
}

fn run_cleanup(
    commands: &mut Commands,
    state: &mut MinefieldState,
    mines: &Query<Entity, With<Mine>>,
) {
    if state.cleanup_in_progress {
        return;
    }
    // Stays set until the engine is re-armed; overlapping exit triggers in
    // later frames fall through here.
    state.cleanup_in_progress = true;
    state.active = false;
    state.pending.clear();
    state.order.clear();
    for entity in mines.iter() {
        commands.entity(entity).despawn();
    }
    info!("Minefield cleaned up");
}

pub(crate) fn cleanup_minefield(
    mut commands: Commands,
    mut ended: MessageReader<PhaseEndedEvent>,
    mut resets: MessageReader<EncounterResetEvent>,
    mut state: ResMut<MinefieldState>,
    mines: Query<Entity, With<Mine>>,
) {
    let phase_over = ended.read().any(|e| e.phase == Phase::Minefield);
    let reset = resets.read().next().is_some();
    if phase_over || reset {
        run_cleanup(&mut commands, &mut state, &mines);
    }
}

pub(crate) fn teardown_minefield(
    mut commands: Commands,
    mut state: ResMut<MinefieldState>,
    mines: Query<Entity, With<Mine>>,
) {
    run_cleanup(&mut commands, &mut state, &mines);
}
