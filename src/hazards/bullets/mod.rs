//! Bullet-pattern engine: five hazard patterns plus the shield spawner.

mod components;
mod patterns;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{BulletsState, PatternKind, Projectile, ShieldPickup};

use bevy::prelude::*;

use crate::core::GameState;
use crate::encounter::EncounterSet;
use crate::hazards::bullets::systems::{
    advance_projectiles, arm_bullets, check_projectile_hits, cleanup_bullets, collect_shields,
    emit_patterns, spawn_shields,
};

pub struct BulletsPlugin;

impl Plugin for BulletsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BulletsState>()
            .add_systems(
                Update,
                (
                    arm_bullets,
                    emit_patterns,
                    spawn_shields,
                    advance_projectiles,
                    check_projectile_hits,
                    collect_shields,
                    cleanup_bullets,
                )
                    .chain()
                    .in_set(EncounterSet::Bullets)
                    .run_if(in_state(GameState::Fight)),
            )
            .add_systems(OnExit(GameState::Fight), systems::teardown_bullets);
    }
}
