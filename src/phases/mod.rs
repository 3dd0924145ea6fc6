//! Phases domain: the canonical phase sequence and transition rules.
//!
//! The scheduler owns which engine is active, the scripted-once guarantees,
//! the randomized filler pool, and the boss's vulnerability windows. Engines
//! never mutate phase state; they only read it and report completion.

mod events;
mod scheduler;
mod systems;
#[cfg(test)]
mod tests;
mod types;

pub use events::{
    DuelRoundLostEvent, PathTraceFinishedEvent, PhaseEndedEvent, PhaseStartedEvent,
    StartScriptedPhaseEvent,
};
pub use scheduler::{PhaseScheduler, SchedulerEvent};
pub use types::{Phase, ScriptedKind};

use bevy::prelude::*;

use crate::core::GameState;
use crate::phases::systems::{
    enforce_vulnerability_rules, handle_duel_loss_filler, handle_pathtrace_finished,
    handle_start_requests, tick_scheduler, trigger_scripted_by_health,
};

pub struct PhasesPlugin;

impl Plugin for PhasesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhaseScheduler>()
            .add_message::<PhaseStartedEvent>()
            .add_message::<PhaseEndedEvent>()
            .add_message::<StartScriptedPhaseEvent>()
            .add_message::<PathTraceFinishedEvent>()
            .add_message::<DuelRoundLostEvent>()
            .add_systems(
                Update,
                (
                    tick_scheduler,
                    trigger_scripted_by_health,
                    handle_start_requests,
                    handle_pathtrace_finished,
                    handle_duel_loss_filler,
                    enforce_vulnerability_rules,
                )
                    .chain()
                    .in_set(crate::encounter::EncounterSet::Scheduler)
                    .run_if(in_state(GameState::Fight)),
            );
    }
}
