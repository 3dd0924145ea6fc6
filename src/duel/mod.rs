//! Duel domain: the "Yan Ken Po" minigame gating the final kill.
//!
//! The duel owns player input for its selection window, resolves rounds with
//! weighted probabilities, and is the only source of privileged boss damage.

mod resolution;
mod state;
mod systems;
#[cfg(test)]
mod tests;

pub use resolution::{classify, resolve_weighted, timeout_pair, DuelChoice, RawOutcome, RoundOutcome};
pub use state::{DuelStage, DuelState};

use bevy::prelude::*;

use crate::core::GameState;
use crate::duel::systems::{arm_duel, pause_on_reset, run_duel};
use crate::encounter::EncounterSet;

pub struct DuelPlugin;

impl Plugin for DuelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DuelState>()
            .add_systems(
                Update,
                (arm_duel, run_duel, pause_on_reset)
                    .chain()
                    .in_set(EncounterSet::Duel)
                    .run_if(in_state(GameState::Fight)),
            )
            .add_systems(OnExit(GameState::Fight), systems::teardown_duel);
    }
}
