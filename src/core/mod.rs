//! Core domain: game states, arena bounds, run seed, and tuning data.

mod resources;
mod state;
mod systems;
mod tuning;

pub use resources::{ArenaBounds, ArenaThird, EncounterConfig, EncounterRng};
pub use state::GameState;
pub use tuning::{
    BossTuning, BulletsTuning, DamageTuning, DuelTuning, EncounterTuning, MinefieldTuning,
    PathTraceTuning, PhaseTuning, PlayerTuning, SummonTuning,
};

use bevy::prelude::*;

use crate::core::systems::{load_tuning_overrides, seed_rng, setup_camera, start_fight};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<EncounterConfig>()
            .init_resource::<ArenaBounds>()
            .init_resource::<EncounterTuning>()
            .add_systems(
                Startup,
                (setup_camera, load_tuning_overrides, seed_rng, start_fight).chain(),
            );
    }
}
