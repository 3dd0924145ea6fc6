//! Core domain: startup systems and the tuning override loader.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use crate::core::resources::{EncounterConfig, EncounterRng};
use crate::core::state::GameState;
use crate::core::tuning::EncounterTuning;

/// Error type for tuning load failures. Never fatal: the encounter always
/// falls back to built-in defaults.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn load_tuning_file(path: &Path) -> Result<EncounterTuning, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    ron_options()
        .from_str(&contents)
        .map_err(|e| TuningLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Replace the default tuning with `assets/encounter.ron` when present.
pub(crate) fn load_tuning_overrides(mut tuning: ResMut<EncounterTuning>) {
    let path = Path::new("assets/encounter.ron");
    if !path.exists() {
        info!("No tuning override file, using built-in encounter tuning");
        return;
    }

    match load_tuning_file(path) {
        Ok(loaded) => {
            info!("Loaded encounter tuning from {}", path.display());
            *tuning = loaded;
        }
        Err(e) => {
            warn!("{}; keeping built-in tuning", e);
        }
    }
}

/// Build the shared gameplay RNG from the run seed so a given seed always
/// replays the same encounter.
pub(crate) fn seed_rng(mut commands: Commands, config: Res<EncounterConfig>) {
    info!("Encounter seed: {}", config.seed);
    commands.insert_resource(EncounterRng::from_seed(config.seed));
}

pub(crate) fn start_fight(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Fight);
}
