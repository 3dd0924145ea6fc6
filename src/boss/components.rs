//! Boss domain: components for health, immunity, and movement state.

use bevy::prelude::*;

use crate::phases::Phase;

#[derive(Component, Debug)]
pub struct Boss;

/// Boss health pool. `active` drops to false on defeat so stale events and
/// scheduled actions can no-op instead of mutating a dead boss.
#[derive(Component, Debug, Clone)]
pub struct BossHealth {
    pub current: f32,
    pub max: f32,
    pub active: bool,
}

impl BossHealth {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            active: true,
        }
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Hunting speed multiplier derived from missing health: 1.0 at full
    /// health, up to 2.0 near death.
    pub fn aggression(&self) -> f32 {
        1.0 + (1.0 - self.fraction())
    }

    pub fn deplete(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }
}

/// Immunity window. `forced` is owned by the scheduler (phase immunity);
/// `timer` is the regular countdown window from `make_immune`.
#[derive(Component, Debug, Default)]
pub struct Immunity {
    pub timer: f32,
    pub forced: bool,
}

impl Immunity {
    pub fn is_immune(&self) -> bool {
        self.forced || self.timer > 0.0
    }

    /// Extend (never shorten) the immunity window.
    pub fn make_immune(&mut self, duration: f32) {
        self.timer = self.timer.max(duration);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Steer toward the player, scaled by aggression.
    Hunting,
    /// Pinned to arena center with zero velocity.
    #[default]
    Locked,
    /// Velocity zeroed but position left alone (the minefield engine moves
    /// the boss itself by teleporting).
    Frozen,
}

/// Movement controller state. No timers of its own; purely reactive to the
/// scheduler's phase.
#[derive(Component, Debug)]
pub struct BossMovement {
    pub mode: MovementMode,
    pub base_speed: f32,
    /// Phase-specific speed factor from `adjust_for_phase`.
    pub phase_factor: f32,
}

impl BossMovement {
    pub fn new(base_speed: f32) -> Self {
        Self {
            mode: MovementMode::Locked,
            base_speed,
            phase_factor: 1.0,
        }
    }

    pub fn enable_hunting(&mut self) {
        self.mode = MovementMode::Hunting;
    }

    pub fn lock_and_center(&mut self) {
        self.mode = MovementMode::Locked;
    }

    /// Phase-specific movement tuning: hunting pursues; minefield and path
    /// trace leave positioning to their engines (teleport cycle, path
    /// traversal); everything else pins the boss to center.
    pub fn adjust_for_phase(&mut self, phase: Phase) {
        match phase {
            Phase::Hunting => {
                self.enable_hunting();
                self.phase_factor = 1.0;
            }
            Phase::Minefield | Phase::PathTrace => {
                self.mode = MovementMode::Frozen;
                self.phase_factor = 0.0;
            }
            Phase::Intro | Phase::Summoning | Phase::Bullets | Phase::Duel => {
                self.lock_and_center();
                self.phase_factor = 0.0;
            }
        }
    }
}
