//! Presentation domain: transient visual cues and phase banners.
//!
//! Purely cosmetic; nothing here feeds back into encounter state. Engines
//! fire `PresentationCueEvent`s and this domain turns them into short-lived
//! flash sprites and log banners.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::boss::BossDefeatedEvent;
use crate::core::GameState;
use crate::encounter::EncounterSet;
use crate::phases::{PhaseEndedEvent, PhaseStartedEvent};
use crate::player::PlayerDefeatedEvent;

const FLASH_LIFETIME: f32 = 0.35;
const FLASH_BASE_SIZE: f32 = 60.0;

/// A one-shot visual cue at a world position. `category` is a stable label
/// for logs and future audio hooks.
#[derive(Debug)]
pub struct PresentationCueEvent {
    pub category: &'static str,
    pub color: Color,
    pub intensity: f32,
    pub position: Vec2,
}

impl Message for PresentationCueEvent {}

impl PresentationCueEvent {
    pub fn flash(category: &'static str, color: Color, intensity: f32, position: Vec2) -> Self {
        Self {
            category,
            color,
            intensity,
            position,
        }
    }
}

/// An expanding, fading flash sprite.
#[derive(Component, Debug)]
struct CueFlash {
    timer: f32,
}

pub(crate) fn spawn_cue_flashes(
    mut commands: Commands,
    mut cues: MessageReader<PresentationCueEvent>,
) {
    for cue in cues.read() {
        debug!("Cue: {} at {:?}", cue.category, cue.position);
        commands.spawn((
            CueFlash {
                timer: FLASH_LIFETIME,
            },
            Sprite {
                color: cue.color,
                custom_size: Some(Vec2::splat(FLASH_BASE_SIZE * cue.intensity)),
                ..default()
            },
            Transform::from_xyz(cue.position.x, cue.position.y, 2.0),
        ));
    }
}

pub(crate) fn fade_cue_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut CueFlash, &mut Sprite, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut flash, mut sprite, mut transform) in &mut flashes {
        flash.timer -= dt;
        if flash.timer <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        let t = flash.timer / FLASH_LIFETIME;
        sprite.color = sprite.color.with_alpha(t);
        let grow = 1.0 + (1.0 - t) * 0.6;
        transform.scale = Vec3::splat(grow);
    }
}

/// Phase banners. Log-only; a HUD would subscribe to the same messages.
pub(crate) fn announce_phases(
    mut started: MessageReader<PhaseStartedEvent>,
    mut ended: MessageReader<PhaseEndedEvent>,
) {
    for event in started.read() {
        let flavor = if event.filler { " (filler)" } else { "" };
        info!("=== {:?}{} ===", event.phase, flavor);
    }
    for event in ended.read() {
        if event.aborted {
            info!("=== {:?} aborted ===", event.phase);
        }
    }
}

pub(crate) fn announce_outcome(
    mut boss_down: MessageReader<BossDefeatedEvent>,
    mut player_down: MessageReader<PlayerDefeatedEvent>,
) {
    if boss_down.read().next().is_some() {
        info!("=== VICTORY ===");
    }
    if player_down.read().next().is_some() {
        info!("=== DEFEAT ===");
    }
}

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PresentationCueEvent>().add_systems(
            Update,
            (
                spawn_cue_flashes,
                fade_cue_flashes,
                announce_phases,
                announce_outcome,
            )
                .in_set(EncounterSet::Presentation)
                .run_if(in_state(GameState::Fight)),
        );
    }
}
