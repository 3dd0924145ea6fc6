//! Player domain: the narrow collaborator surface the encounter consumes.
//!
//! The encounter only needs position/size queries, a damage intake, a life
//! count, a temporary speed modifier, and a temporary input claim. This
//! module hosts a minimal playable implementation of exactly that surface.

mod components;
mod resources;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{GameLayer, Player, PlayerHealth, PlayerInvulnerable, PlayerShield};
pub use resources::{InputClaim, PlayerLives, PlayerSpeedMod};

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::core::GameState;
use crate::player::systems::{
    apply_player_hits, apply_player_movement, handle_life_loss, spawn_player, tick_player_timers,
};

/// Where a player hit came from, for presentation and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardSource {
    Mine,
    Projectile,
    TraceTrail,
    SweepLine,
    BossContact,
}

/// A hazard engine reporting contact damage to the player.
#[derive(Debug)]
pub struct PlayerHitEvent {
    pub amount: f32,
    pub source: HazardSource,
}

impl Message for PlayerHitEvent {}

/// Directly removes one life, bypassing health (duel losses).
#[derive(Debug)]
pub struct LoseLifeEvent;

impl Message for LoseLifeEvent {}

/// The player is out of lives; the encounter ends in defeat.
#[derive(Debug)]
pub struct PlayerDefeatedEvent;

impl Message for PlayerDefeatedEvent {}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerLives>()
            .init_resource::<PlayerSpeedMod>()
            .init_resource::<InputClaim>()
            .add_message::<PlayerHitEvent>()
            .add_message::<LoseLifeEvent>()
            .add_message::<PlayerDefeatedEvent>()
            .add_systems(OnEnter(GameState::Fight), spawn_player)
            .add_systems(
                Update,
                (
                    apply_player_movement,
                    tick_player_timers,
                    apply_player_hits,
                    handle_life_loss,
                )
                    .chain()
                    .in_set(crate::encounter::EncounterSet::Input)
                    .run_if(in_state(GameState::Fight)),
            );
    }
}
