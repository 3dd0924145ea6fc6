//! Path-trace engine: previewed boss paths with a damaging trail, plus the
//! parallel grid sweep.

mod components;
mod shapes;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{GridSweepLine, PathTraceState, SweepAxis, TracePath, TraceStage, TraceTrail};

use bevy::prelude::*;

use crate::core::GameState;
use crate::encounter::EncounterSet;
use crate::hazards::pathtrace::systems::{
    arm_pathtrace, check_trail_contact, cleanup_pathtrace, regenerate_grid, run_rounds,
    sweep_lines,
};

pub struct PathTracePlugin;

impl Plugin for PathTracePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PathTraceState>()
            .add_systems(
                Update,
                (
                    arm_pathtrace,
                    run_rounds,
                    check_trail_contact,
                    regenerate_grid,
                    sweep_lines,
                    cleanup_pathtrace,
                )
                    .chain()
                    .in_set(EncounterSet::PathTrace)
                    .run_if(in_state(GameState::Fight)),
            )
            .add_systems(OnExit(GameState::Fight), systems::teardown_pathtrace);
    }
}
