//! Minefield engine: timed and permanent explosive hazards with
//! chain-reaction propagation.

mod components;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{Mine, MineKind, MinefieldState, PendingDetonation};

use bevy::prelude::*;

use crate::core::GameState;
use crate::encounter::EncounterSet;
use crate::hazards::minefield::systems::{
    arm_minefield, check_mine_contact, cleanup_minefield, hunt_teleport_cycle,
    process_pending_detonations, static_field_cycle, tick_mines,
};

pub struct MinefieldPlugin;

impl Plugin for MinefieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MinefieldState>()
            .add_systems(
                Update,
                (
                    arm_minefield,
                    hunt_teleport_cycle,
                    static_field_cycle,
                    tick_mines,
                    check_mine_contact,
                    process_pending_detonations,
                    cleanup_minefield,
                )
                    .chain()
                    .in_set(EncounterSet::Minefield)
                    .run_if(in_state(GameState::Fight)),
            )
            .add_systems(OnExit(GameState::Fight), systems::teardown_minefield);
    }
}
