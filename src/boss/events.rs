//! Boss domain: damage and lifecycle messages.

use bevy::ecs::message::Message;

/// Which path damage arrives through. Regular weapon damage is scaled and
/// gated on immunity; duel damage is privileged and bypasses both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Weapon,
    Duel,
}

/// The single damage entry point for the rest of the game.
#[derive(Debug)]
pub struct DamageBossEvent {
    pub amount: f32,
    pub source: DamageSource,
}

impl Message for DamageBossEvent {}

/// Damage actually landed. `applied` is zero for rejected hits.
#[derive(Debug)]
pub struct BossDamagedEvent {
    pub applied: f32,
    pub remaining: f32,
}

impl Message for BossDamagedEvent {}

/// Boss health crossed one of the configured fractions (0.6 / 0.3 / 0.15).
/// Consumed by movement aggression and presentation flavor hooks.
#[derive(Debug)]
pub struct HealthThresholdEvent {
    pub threshold: f32,
}

impl Message for HealthThresholdEvent {}

#[derive(Debug)]
pub struct BossDefeatedEvent;

impl Message for BossDefeatedEvent {}

/// Low-health panic summon, forwarded to the external wave spawner.
#[derive(Debug)]
pub struct EmergencySummonEvent;

impl Message for EmergencySummonEvent {}
