//! Duel domain: round state machine.

use bevy::prelude::*;

use crate::duel::resolution::DuelChoice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuelStage {
    #[default]
    Countdown,
    /// Input is claimed; the player picks a choice or times out.
    Selection,
    /// Result shown before the next round or a filler phase.
    Result,
}

/// Persistent duel state. `wins` survives filler phases; only a full
/// encounter reset clears it.
#[derive(Resource, Debug, Default)]
pub struct DuelState {
    /// False while a filler phase has the floor.
    pub active: bool,
    pub stage: DuelStage,
    pub stage_timer: f32,
    pub wins: u32,
    pub player_choice: Option<DuelChoice>,
}

impl DuelState {
    /// Start (or resume) the duel at the countdown, keeping `wins`.
    pub fn begin_round(&mut self, countdown: f32) {
        self.active = true;
        self.stage = DuelStage::Countdown;
        self.stage_timer = countdown;
        self.player_choice = None;
    }

    /// Record a win, saturating at the cap. Returns true when the cap is
    /// reached (the terminal victory).
    pub fn record_win(&mut self, max_defeats: u32) -> bool {
        self.wins = (self.wins + 1).min(max_defeats);
        self.wins == max_defeats
    }

    /// Suspend the duel (filler phase, reset). Idempotent.
    pub fn suspend(&mut self) {
        self.active = false;
        self.player_choice = None;
    }

    /// Full reset, dropping `wins`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
