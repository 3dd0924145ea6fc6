//! Bullets engine: projectile components and engine-owned state.

use bevy::prelude::*;
use std::collections::VecDeque;

/// The five bullet patterns. A run uses a short rotation picked from these,
/// not all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Rotating stream from the boss.
    Spiral,
    /// Edge-spanning wall with a gap aligned to the player.
    Wall,
    /// Cardinal volleys with an occasional diagonal surprise.
    Cross,
    /// Loose aimed shots with angular jitter.
    Rain,
    /// Telegraphed charge-up, then a fast piercing stream.
    Burst,
}

impl PatternKind {
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Spiral,
        PatternKind::Wall,
        PatternKind::Cross,
        PatternKind::Rain,
        PatternKind::Burst,
    ];
}

#[derive(Component, Debug)]
pub struct Projectile {
    pub velocity: Vec2,
    pub lifetime: f32,
    /// The pattern that emitted this shot.
    pub pattern: PatternKind,
    /// Piercing shots survive player contact instead of popping.
    pub piercing: bool,
}

/// Collectible that refreshes the player's shield timer.
#[derive(Component, Debug)]
pub struct ShieldPickup {
    pub radius: f32,
}

/// All bullets engine state: the pattern rotation for this run, per-pattern
/// emission timers, and spawn order for cap eviction.
#[derive(Resource, Debug, Default)]
pub struct BulletsState {
    pub active: bool,
    /// Reentrancy guard, cleared when the engine re-arms.
    pub cleanup_in_progress: bool,
    /// Patterns this run cycles through, each getting an equal time slice.
    pub rotation: Vec<PatternKind>,
    pub slice_index: usize,
    pub slice_timer: f32,
    pub slice_duration: f32,
    pub emit_timer: f32,
    pub spiral_angle: f32,
    /// Burst pattern sub-state: charging telegraph, then a counted stream.
    pub burst_charging: bool,
    pub burst_timer: f32,
    pub burst_remaining: u32,
    pub shield_timer: f32,
    pub order: VecDeque<Entity>,
}

impl BulletsState {
    pub fn arm(&mut self, rotation: Vec<PatternKind>, duration: f32, shield_interval: f32) {
        self.active = true;
        self.cleanup_in_progress = false;
        self.slice_duration = duration / rotation.len().max(1) as f32;
        self.rotation = rotation;
        self.slice_index = 0;
        self.slice_timer = self.slice_duration;
        self.shield_timer = shield_interval;
        self.reset_pattern();
    }

    pub fn current_pattern(&self) -> Option<PatternKind> {
        self.rotation.get(self.slice_index).copied()
    }

    /// Advance the slice clock; returns true when the rotation moved on to
    /// its next pattern.
    pub fn advance_slice(&mut self, dt: f32) -> bool {
        if self.rotation.len() < 2 || self.slice_index + 1 >= self.rotation.len() {
            return false;
        }
        self.slice_timer -= dt;
        if self.slice_timer > 0.0 {
            return false;
        }
        self.slice_index += 1;
        self.slice_timer = self.slice_duration;
        self.reset_pattern();
        true
    }

    /// Drop a projectile from the spawn-order record. Returns false if it
    /// already left (cap eviction and contact in the same frame).
    pub fn retire(&mut self, projectile: Entity) -> bool {
        if let Some(idx) = self.order.iter().position(|e| *e == projectile) {
            self.order.remove(idx);
            true
        } else {
            false
        }
    }

    fn reset_pattern(&mut self) {
        self.emit_timer = 0.0;
        self.spiral_angle = 0.0;
        self.burst_charging = false;
        self.burst_timer = 0.0;
        self.burst_remaining = 0;
    }
}
