//! Encounter domain: the orchestrator.
//!
//! Owns the boss entity, the frame order every other domain hangs off, the
//! forced-reset flow, and defeat finalization. Domains never order against
//! each other directly; they order against `EncounterSet`.

mod systems;

pub use systems::VictoryCountdown;

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::core::GameState;
use crate::encounter::systems::{
    boss_contact_damage, finalize_victory, handle_reset, spawn_boss, start_intro,
};

/// Intra-frame stages. Chained, so a phase transition resolved by the
/// scheduler is visible to every engine in the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncounterSet {
    /// Player input and player-side timers.
    Input,
    /// Boss movement controller and immunity ticks.
    Movement,
    /// Phase scheduler transitions and vulnerability rules.
    Scheduler,
    Summoning,
    Minefield,
    Bullets,
    PathTrace,
    Duel,
    /// Damage application; the single place boss health changes.
    Resolution,
    /// Cosmetic-only output.
    Presentation,
}

/// Force the whole encounter back to the intro beat. Every engine clears
/// its own state on this; the orchestrator resets the actors.
#[derive(Debug)]
pub struct EncounterResetEvent;

impl Message for EncounterResetEvent {}

pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EncounterResetEvent>()
            .init_resource::<VictoryCountdown>()
            .configure_sets(
                Update,
                (
                    EncounterSet::Input,
                    EncounterSet::Movement,
                    EncounterSet::Scheduler,
                    EncounterSet::Summoning,
                    EncounterSet::Minefield,
                    EncounterSet::Bullets,
                    EncounterSet::PathTrace,
                    EncounterSet::Duel,
                    EncounterSet::Resolution,
                    EncounterSet::Presentation,
                )
                    .chain(),
            )
            .add_systems(OnEnter(GameState::Fight), (spawn_boss, start_intro).chain())
            .add_systems(
                Update,
                (
                    handle_reset.in_set(EncounterSet::Scheduler),
                    boss_contact_damage.in_set(EncounterSet::Resolution),
                    finalize_victory.in_set(EncounterSet::Resolution),
                )
                    .run_if(in_state(GameState::Fight)),
            );
    }
}
