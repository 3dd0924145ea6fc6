//! Phases domain: systems driving the scheduler each frame.
//!
//! These run in the Scheduler set, ahead of every hazard engine, so a
//! transition is always fully resolved before an engine reads the phase.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::boss::{Boss, BossHealth, Immunity};
use crate::core::{EncounterRng, EncounterTuning, PhaseTuning};
use crate::phases::events::{
    DuelRoundLostEvent, PathTraceFinishedEvent, PhaseEndedEvent, PhaseStartedEvent,
    StartScriptedPhaseEvent,
};
use crate::phases::scheduler::{PhaseScheduler, SchedulerEvent};
use crate::phases::types::{Phase, ScriptedKind};

/// Scheduler-owned duration for a scripted kind. PathTrace paces itself by
/// rounds, so the scheduler holds no clock for it.
pub(crate) fn scripted_duration(kind: ScriptedKind, phases: &PhaseTuning) -> f32 {
    match kind {
        ScriptedKind::Summoning => phases.summoning_duration,
        ScriptedKind::Minefield => phases.minefield_duration,
        ScriptedKind::Bullets => phases.bullets_duration,
        ScriptedKind::PathTrace => 0.0,
    }
}

fn emit(
    event: SchedulerEvent,
    started: &mut MessageWriter<PhaseStartedEvent>,
    ended: &mut MessageWriter<PhaseEndedEvent>,
) {
    match event {
        SchedulerEvent::Ended {
            phase,
            filler,
            aborted,
        } => {
            info!(
                "Phase {:?} ended (filler: {}, aborted: {})",
                phase, filler, aborted
            );
            ended.write(PhaseEndedEvent {
                phase,
                filler,
                aborted,
            });
            if filler {
                // Fillers hand control straight back to the duel countdown.
                started.write(PhaseStartedEvent {
                    phase: Phase::Duel,
                    filler: false,
                    duration: 0.0,
                });
            }
        }
        SchedulerEvent::DuelEntered => {
            info!("All scripted phases spent; entering the duel");
            started.write(PhaseStartedEvent {
                phase: Phase::Duel,
                filler: false,
                duration: 0.0,
            });
        }
    }
}

pub(crate) fn tick_scheduler(
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut started: MessageWriter<PhaseStartedEvent>,
    mut ended: MessageWriter<PhaseEndedEvent>,
) {
    if let Some(event) = scheduler.tick(time.delta_secs(), tuning.phases.vulnerability_window) {
        emit(event, &mut started, &mut ended);
    }
}

/// While hunting, fire the next undone scripted phase once boss health
/// crosses its trigger fraction. External code can also request phases
/// explicitly with `StartScriptedPhaseEvent`.
pub(crate) fn trigger_scripted_by_health(
    scheduler: Res<PhaseScheduler>,
    tuning: Res<EncounterTuning>,
    boss_query: Query<&BossHealth, With<Boss>>,
    mut requests: MessageWriter<StartScriptedPhaseEvent>,
) {
    if scheduler.current() != Phase::Hunting || scheduler.in_vulnerability_window() {
        return;
    }
    let Ok(health) = boss_query.single() else {
        return;
    };

    let fraction = health.fraction();
    let triggers = [
        (ScriptedKind::Summoning, tuning.phases.summoning_at),
        (ScriptedKind::Minefield, tuning.phases.minefield_at),
        (ScriptedKind::Bullets, tuning.phases.bullets_at),
        (ScriptedKind::PathTrace, tuning.phases.pathtrace_at),
    ];

    for (kind, at) in triggers {
        if !scheduler.scripted_done(kind) {
            if fraction <= at {
                requests.write(StartScriptedPhaseEvent { kind });
            }
            // Only the next undone phase in canonical order may fire.
            break;
        }
    }
}

pub(crate) fn handle_start_requests(
    mut requests: MessageReader<StartScriptedPhaseEvent>,
    tuning: Res<EncounterTuning>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut started: MessageWriter<PhaseStartedEvent>,
) {
    for request in requests.read() {
        let duration = scripted_duration(request.kind, &tuning.phases);
        if scheduler.try_start_scripted(request.kind, duration) {
            info!("Scripted phase {:?} started", request.kind);
            started.write(PhaseStartedEvent {
                phase: request.kind.phase(),
                filler: false,
                duration,
            });
        } else {
            debug!("Ignored start request for {:?}", request.kind);
        }
    }
}

pub(crate) fn handle_pathtrace_finished(
    mut finished: MessageReader<PathTraceFinishedEvent>,
    tuning: Res<EncounterTuning>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut started: MessageWriter<PhaseStartedEvent>,
    mut ended: MessageWriter<PhaseEndedEvent>,
) {
    for event in finished.read() {
        if scheduler.current() != Phase::PathTrace {
            continue;
        }
        if let Some(resolved) =
            scheduler.finish_active(!event.completed, tuning.phases.vulnerability_window)
        {
            emit(resolved, &mut started, &mut ended);
        }
    }
}

/// A lost duel round buys the player one filler phase. If every kind is
/// used up, the duel just resumes.
pub(crate) fn handle_duel_loss_filler(
    mut losses: MessageReader<DuelRoundLostEvent>,
    tuning: Res<EncounterTuning>,
    mut rng: ResMut<EncounterRng>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut started: MessageWriter<PhaseStartedEvent>,
) {
    for _ in losses.read() {
        let max_uses = tuning.phases.filler_max_uses;
        let picked = scheduler.pick_filler(&mut rng.0, max_uses);

        if let Some(kind) = picked {
            let duration = scripted_duration(kind, &tuning.phases) * tuning.phases.filler_scale;
            if scheduler.try_start_filler(kind, duration, max_uses) {
                info!(
                    "Duel loss: filler phase {:?} ({} uses)",
                    kind,
                    scheduler.filler_uses(kind)
                );
                started.write(PhaseStartedEvent {
                    phase: kind.phase(),
                    filler: true,
                    duration,
                });
                continue;
            }
        }

        info!("Filler pool exhausted; duel resumes directly");
        started.write(PhaseStartedEvent {
            phase: Phase::Duel,
            filler: false,
            duration: 0.0,
        });
    }
}

/// The scheduler owns the boss's vulnerability state: forced immunity while
/// any special phase is active, forced vulnerability during the post-phase
/// window.
pub(crate) fn enforce_vulnerability_rules(
    scheduler: Res<PhaseScheduler>,
    mut boss_query: Query<&mut Immunity, With<Boss>>,
) {
    let Ok(mut immunity) = boss_query.single_mut() else {
        return;
    };

    immunity.forced = scheduler.phase_forces_immunity();
    if scheduler.in_vulnerability_window() {
        immunity.timer = 0.0;
    }
}
