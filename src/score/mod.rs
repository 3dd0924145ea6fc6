//! Score domain: run score accumulation.
//!
//! Collaborator surface for the wider game; the encounter only feeds it
//! damage ticks and the victory bonus.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::boss::BossDamagedEvent;
use crate::core::GameState;
use crate::encounter::EncounterSet;

/// Points per point of damage actually landed on the boss.
const DAMAGE_SCORE_RATE: f32 = 0.1;

#[derive(Debug)]
pub struct ScoreEvent {
    pub points: u64,
    pub reason: &'static str,
}

impl Message for ScoreEvent {}

#[derive(Resource, Debug, Default)]
pub struct ScoreBoard {
    pub total: u64,
}

impl ScoreBoard {
    pub fn award(&mut self, points: u64) {
        self.total = self.total.saturating_add(points);
    }
}

pub(crate) fn collect_score_events(
    mut events: MessageReader<ScoreEvent>,
    mut board: ResMut<ScoreBoard>,
) {
    for event in events.read() {
        board.award(event.points);
        info!("+{} ({}), total {}", event.points, event.reason, board.total);
    }
}

/// Landed boss damage trickles into the score.
pub(crate) fn score_boss_damage(
    mut damaged: MessageReader<BossDamagedEvent>,
    mut board: ResMut<ScoreBoard>,
) {
    for event in damaged.read() {
        if event.applied > 0.0 {
            board.award((event.applied * DAMAGE_SCORE_RATE) as u64);
        }
    }
}

pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScoreBoard>()
            .add_message::<ScoreEvent>()
            .add_systems(
                Update,
                (collect_score_events, score_boss_damage)
                    .in_set(EncounterSet::Presentation)
                    .run_if(in_state(GameState::Fight)),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreBoard;

    #[test]
    fn test_award_saturates() {
        let mut board = ScoreBoard { total: u64::MAX - 5 };
        board.award(100);
        assert_eq!(board.total, u64::MAX);
    }
}
