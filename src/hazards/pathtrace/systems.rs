//! Path-trace engine: round state machine, trail collision, and grid sweep.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::Rng;

use crate::boss::Boss;
use crate::core::{ArenaBounds, EncounterRng, EncounterTuning};
use crate::encounter::EncounterResetEvent;
use crate::hazards::pathtrace::components::{
    GridSweepLine, PathPreviewMarker, PathTraceState, SweepAxis, TracePath, TraceStage,
    TraceTrail,
};
use crate::hazards::pathtrace::shapes::{pick_shape, waypoints};
use crate::phases::{PathTraceFinishedEvent, Phase, PhaseEndedEvent, PhaseScheduler, PhaseStartedEvent};
use crate::player::{HazardSource, Player, PlayerHitEvent, PlayerSpeedMod};
use crate::presentation::PresentationCueEvent;

const MARKER_SPACING: f32 = 60.0;
const LINE_HALF_THICKNESS: f32 = 4.0;
const OFFSCREEN_MARGIN: f32 = 40.0;

/// Spawn one round's path entity plus its static preview markers.
fn start_round(
    commands: &mut Commands,
    state: &mut PathTraceState,
    bounds: &ArenaBounds,
    tuning: &EncounterTuning,
    rng: &mut impl Rng,
) {
    let shape = pick_shape(rng);
    let points = waypoints(shape, bounds, rng);
    let speed = state.round_speed(
        tuning.pathtrace.base_speed,
        tuning.pathtrace.speed_step,
        tuning.pathtrace.rounds_per_step,
    );
    info!(
        "Path-trace round {} of {}: {:?} at {:.0} u/s",
        state.round + 1,
        state.rounds_target,
        shape,
        speed
    );

    // Preview markers along every segment, evenly spaced.
    for pair in points.windows(2) {
        let steps = (pair[0].distance(pair[1]) / MARKER_SPACING).ceil().max(1.0) as u32;
        for i in 0..steps {
            let pos = pair[0].lerp(pair[1], i as f32 / steps as f32);
            commands.spawn((
                PathPreviewMarker,
                Sprite {
                    color: Color::srgba(0.9, 0.2, 0.2, 0.5),
                    custom_size: Some(Vec2::splat(10.0)),
                    ..default()
                },
                Transform::from_xyz(pos.x, pos.y, 0.5),
            ));
        }
    }

    commands.spawn(TracePath {
        waypoints: points,
        index: 1,
        speed,
    });
    state.stage = TraceStage::Preview;
    state.stage_timer = tuning.pathtrace.preview_duration;
    state.last_trail_pos = None;
}

pub(crate) fn arm_pathtrace(
    mut commands: Commands,
    mut started: MessageReader<PhaseStartedEvent>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut rng: ResMut<EncounterRng>,
    mut state: ResMut<PathTraceState>,
    mut speed_mod: ResMut<PlayerSpeedMod>,
) {
    for event in started.read() {
        if event.phase != Phase::PathTrace {
            continue;
        }
        // Fillers run a shortened sequence; rounds are this phase's clock.
        let rounds = if event.filler {
            (tuning.pathtrace.rounds / 2).max(1)
        } else {
            tuning.pathtrace.rounds
        };
        state.arm(rounds, tuning.pathtrace.grid_interval);
        speed_mod.set(tuning.pathtrace.player_slow_factor);
        start_round(&mut commands, &mut state, &bounds, &tuning, &mut rng.0);
    }
}

/// Drive the preview → traversal → intermission machine. The boss is frozen
/// by the movement controller for this phase, so the traversal owns its
/// transform outright.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_rounds(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut rng: ResMut<EncounterRng>,
    mut state: ResMut<PathTraceState>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut finished: MessageWriter<PathTraceFinishedEvent>,
    mut cues: MessageWriter<PresentationCueEvent>,
    mut path_query: Query<(Entity, &mut TracePath)>,
    mut boss_query: Query<&mut Transform, With<Boss>>,
    leftovers: Query<Entity, Or<(With<TraceTrail>, With<PathPreviewMarker>)>>,
) {
    if !state.active {
        return;
    }
    let dt = time.delta_secs();

    match state.stage {
        TraceStage::Idle => {}
        TraceStage::Preview => {
            state.stage_timer -= dt;
            if state.stage_timer > 0.0 {
                return;
            }
            // Snap the boss to the path start and begin the run.
            if let (Ok((_, path)), Ok(mut boss_transform)) =
                (path_query.single_mut(), boss_query.single_mut())
            {
                let start = path.waypoints[0];
                boss_transform.translation.x = start.x;
                boss_transform.translation.y = start.y;
            }
            state.stage = TraceStage::Traversal;
        }
        TraceStage::Traversal => {
            let (Ok((path_entity, mut path)), Ok(mut boss_transform)) =
                (path_query.single_mut(), boss_query.single_mut())
            else {
                return;
            };
            let mut pos = boss_transform.translation.truncate();
            let mut remaining = path.speed * dt;

            while remaining > 0.0 && path.index < path.waypoints.len() {
                let target = path.waypoints[path.index];
                let to_target = target - pos;
                let dist = to_target.length();
                if dist <= remaining {
                    pos = target;
                    remaining -= dist;
                    path.index += 1;
                } else {
                    pos += to_target / dist * remaining;
                    remaining = 0.0;
                }
            }
            boss_transform.translation.x = pos.x;
            boss_transform.translation.y = pos.y;

            // Drop the trail behind the boss, evenly spaced.
            let spacing = tuning.pathtrace.trail_radius;
            if state
                .last_trail_pos
                .is_none_or(|last| last.distance(pos) >= spacing)
            {
                state.last_trail_pos = Some(pos);
                commands.spawn((
                    TraceTrail {
                        radius: tuning.pathtrace.trail_radius,
                    },
                    Sprite {
                        color: Color::srgba(1.0, 0.3, 0.1, 0.8),
                        custom_size: Some(Vec2::splat(tuning.pathtrace.trail_radius)),
                        ..default()
                    },
                    Transform::from_xyz(pos.x, pos.y, 0.6),
                ));
            }

            if path.index < path.waypoints.len() {
                return;
            }

            // Round complete: clear the field and open the free-hit beat.
            commands.entity(path_entity).despawn();
            for entity in leftovers.iter() {
                commands.entity(entity).despawn();
            }
            state.round += 1;
            state.last_trail_pos = None;
            scheduler.grant_vulnerability(tuning.phases.vulnerability_window);
            cues.write(PresentationCueEvent::flash(
                "trace_round_clear",
                Color::srgb(0.2, 0.9, 0.9),
                0.8,
                pos,
            ));

            if state.round >= state.rounds_target {
                info!("Path-trace sequence complete after {} rounds", state.round);
                state.stage = TraceStage::Idle;
                finished.write(PathTraceFinishedEvent { completed: true });
            } else {
                state.stage = TraceStage::Intermission;
                state.stage_timer = tuning.phases.vulnerability_window;
            }
        }
        TraceStage::Intermission => {
            state.stage_timer -= dt;
            if state.stage_timer <= 0.0 {
                start_round(&mut commands, &mut state, &bounds, &tuning, &mut rng.0);
            }
        }
    }
}

pub(crate) fn check_trail_contact(
    tuning: Res<EncounterTuning>,
    mut hits: MessageWriter<PlayerHitEvent>,
    player_query: Query<&Transform, With<Player>>,
    trail: Query<(&TraceTrail, &Transform), Without<Player>>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (dot, transform) in trail.iter() {
        if transform.translation.truncate().distance(player_pos)
            < dot.radius + tuning.player.radius
        {
            hits.write(PlayerHitEvent {
                amount: tuning.pathtrace.trail_damage,
                source: HazardSource::TraceTrail,
            });
            // One hit per frame is plenty; iframes absorb the rest anyway.
            break;
        }
    }
}

/// Periodically replace the whole grid of sweeping lines. Sweep direction
/// flips per regeneration so the safe strategy changes.
pub(crate) fn regenerate_grid(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut rng: ResMut<EncounterRng>,
    mut state: ResMut<PathTraceState>,
    lines: Query<Entity, With<GridSweepLine>>,
) {
    if !state.active {
        return;
    }
    state.grid_timer -= time.delta_secs();
    if state.grid_timer > 0.0 {
        return;
    }
    state.grid_timer = tuning.pathtrace.grid_interval;

    for entity in lines.iter() {
        commands.entity(entity).despawn();
    }

    let half = bounds.half_extents();
    let sign = if rng.0.random_bool(0.5) { 1.0 } else { -1.0 };
    let cell = tuning.pathtrace.grid_cell;
    let speed = tuning.pathtrace.sweep_speed;

    let mut x = -half.x + cell;
    while x < half.x {
        commands.spawn((
            GridSweepLine {
                axis: SweepAxis::Vertical,
                velocity: sign * speed,
            },
            Sprite {
                color: Color::srgba(0.4, 0.4, 1.0, 0.6),
                custom_size: Some(Vec2::new(LINE_HALF_THICKNESS * 2.0, bounds.height)),
                ..default()
            },
            Transform::from_xyz(x, 0.0, 0.4),
        ));
        x += cell;
    }
    let mut y = -half.y + cell;
    while y < half.y {
        commands.spawn((
            GridSweepLine {
                axis: SweepAxis::Horizontal,
                velocity: sign * speed,
            },
            Sprite {
                color: Color::srgba(0.4, 0.4, 1.0, 0.6),
                custom_size: Some(Vec2::new(bounds.width, LINE_HALF_THICKNESS * 2.0)),
                ..default()
            },
            Transform::from_xyz(0.0, y, 0.4),
        ));
        y += cell;
    }
}

pub(crate) fn sweep_lines(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut hits: MessageWriter<PlayerHitEvent>,
    player_query: Query<&Transform, With<Player>>,
    mut lines: Query<(Entity, &GridSweepLine, &mut Transform), Without<Player>>,
) {
    let dt = time.delta_secs();
    let half = bounds.half_extents() + Vec2::splat(OFFSCREEN_MARGIN);
    let player_pos = player_query
        .single()
        .map(|t| t.translation.truncate())
        .ok();
    let hit_reach = LINE_HALF_THICKNESS + tuning.player.radius;

    for (entity, line, mut transform) in &mut lines {
        let off_edge = match line.axis {
            SweepAxis::Vertical => {
                transform.translation.x += line.velocity * dt;
                transform.translation.x.abs() > half.x
            }
            SweepAxis::Horizontal => {
                transform.translation.y += line.velocity * dt;
                transform.translation.y.abs() > half.y
            }
        };
        if off_edge {
            commands.entity(entity).despawn();
            continue;
        }

        if let Some(player_pos) = player_pos {
            let gap = match line.axis {
                SweepAxis::Vertical => (player_pos.x - transform.translation.x).abs(),
                SweepAxis::Horizontal => (player_pos.y - transform.translation.y).abs(),
            };
            if gap < hit_reach {
                hits.write(PlayerHitEvent {
                    amount: tuning.pathtrace.line_damage,
                    source: HazardSource::SweepLine,
                });
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_cleanup(
    commands: &mut Commands,
    state: &mut PathTraceState,
    speed_mod: &mut PlayerSpeedMod,
    hazards: &Query<
        Entity,
        Or<(
            With<TracePath>,
            With<TraceTrail>,
            With<PathPreviewMarker>,
            With<GridSweepLine>,
        )>,
    >,
) {
    if state.cleanup_in_progress {
        return;
    }
    state.cleanup_in_progress = true;
    state.active = false;
    state.stage = TraceStage::Idle;
    // The slow factor must not outlive the phase, whatever ended it.
    speed_mod.restore();
    for entity in hazards.iter() {
        commands.entity(entity).despawn();
    }
    info!("Path-trace phase cleaned up");
}

pub(crate) fn cleanup_pathtrace(
    mut commands: Commands,
    mut ended: MessageReader<PhaseEndedEvent>,
    mut resets: MessageReader<EncounterResetEvent>,
    mut state: ResMut<PathTraceState>,
    mut speed_mod: ResMut<PlayerSpeedMod>,
    hazards: Query<
        Entity,
        Or<(
            With<TracePath>,
            With<TraceTrail>,
            With<PathPreviewMarker>,
            With<GridSweepLine>,
        )>,
    >,
) {
    let phase_over = ended.read().any(|e| e.phase == Phase::PathTrace);
    let reset = resets.read().next().is_some();
    if phase_over || reset {
        run_cleanup(&mut commands, &mut state, &mut speed_mod, &hazards);
    }
}

pub(crate) fn teardown_pathtrace(
    mut commands: Commands,
    mut state: ResMut<PathTraceState>,
    mut speed_mod: ResMut<PlayerSpeedMod>,
    hazards: Query<
        Entity,
        Or<(
            With<TracePath>,
            With<TraceTrail>,
            With<PathPreviewMarker>,
            With<GridSweepLine>,
        )>,
    >,
) {
    run_cleanup(&mut commands, &mut state, &mut speed_mod, &hazards);
}
