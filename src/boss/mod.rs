//! Boss domain: the boss entity, its damage & immunity model, and the
//! movement controller.

mod components;
mod damage;
mod events;
mod movement;
#[cfg(test)]
mod tests;

pub use components::{Boss, BossHealth, BossMovement, Immunity, MovementMode};
pub use damage::resolve_regular_damage;
pub use events::{
    BossDamagedEvent, BossDefeatedEvent, DamageBossEvent, DamageSource, EmergencySummonEvent,
    HealthThresholdEvent,
};

use bevy::prelude::*;

use crate::core::GameState;
use crate::encounter::EncounterSet;

pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageBossEvent>()
            .add_message::<BossDamagedEvent>()
            .add_message::<HealthThresholdEvent>()
            .add_message::<BossDefeatedEvent>()
            .add_message::<EmergencySummonEvent>()
            .add_systems(
                Update,
                (
                    damage::tick_immunity,
                    movement::sync_movement_mode,
                    movement::hunt_player,
                    movement::hold_locked_position,
                )
                    .chain()
                    .in_set(EncounterSet::Movement)
                    .run_if(in_state(GameState::Fight)),
            )
            .add_systems(
                Update,
                damage::apply_boss_damage
                    .in_set(EncounterSet::Resolution)
                    .run_if(in_state(GameState::Fight)),
            );
    }
}
