//! Debug domain: dev-tools hotkeys for exercising the encounter.
//!
//! Compiled only with the `dev-tools` feature. F1-F4 force the scripted
//! phases, F5 resets the encounter, F6 toggles player invincibility, and
//! Space stands in for the player's weapon.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::boss::{DamageBossEvent, DamageSource};
use crate::core::GameState;
use crate::encounter::{EncounterResetEvent, EncounterSet};
use crate::phases::{ScriptedKind, StartScriptedPhaseEvent};
use crate::player::{Player, PlayerInvulnerable};

/// Stand-in weapon damage per Space press, pre-scaling.
const DEBUG_SHOT_DAMAGE: f32 = 100.0;

#[derive(Resource, Debug, Default)]
struct DebugFlags {
    invincible: bool,
}

fn debug_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    mut flags: ResMut<DebugFlags>,
    mut starts: MessageWriter<StartScriptedPhaseEvent>,
    mut resets: MessageWriter<EncounterResetEvent>,
    mut damage: MessageWriter<DamageBossEvent>,
) {
    let forced = [
        (KeyCode::F1, ScriptedKind::Summoning),
        (KeyCode::F2, ScriptedKind::Minefield),
        (KeyCode::F3, ScriptedKind::Bullets),
        (KeyCode::F4, ScriptedKind::PathTrace),
    ];
    for (key, kind) in forced {
        if keys.just_pressed(key) {
            info!("Debug: forcing {:?}", kind);
            starts.write(StartScriptedPhaseEvent { kind });
        }
    }

    if keys.just_pressed(KeyCode::F5) {
        resets.write(EncounterResetEvent);
    }
    if keys.just_pressed(KeyCode::F6) {
        flags.invincible = !flags.invincible;
        info!("Debug: invincibility {}", flags.invincible);
    }
    if keys.just_pressed(KeyCode::Space) {
        damage.write(DamageBossEvent {
            amount: DEBUG_SHOT_DAMAGE,
            source: DamageSource::Weapon,
        });
    }
}

fn apply_invincibility(
    flags: Res<DebugFlags>,
    mut query: Query<&mut PlayerInvulnerable, With<Player>>,
) {
    if !flags.invincible {
        return;
    }
    for mut invuln in &mut query {
        invuln.timer = invuln.timer.max(0.5);
    }
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugFlags>().add_systems(
            Update,
            (debug_hotkeys, apply_invincibility)
                .in_set(EncounterSet::Input)
                .run_if(in_state(GameState::Fight)),
        );
    }
}
