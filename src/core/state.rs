//! Core domain: top-level game state for the encounter flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    #[default]
    Boot,
    /// The encounter is live: scheduler, engines, and duel all run here.
    Fight,
    Victory,
    Defeat,
}
