//! Minefield engine: mine components and engine-owned state.

use bevy::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MineKind {
    /// Explodes on its own once the fuse runs out.
    Timed { fuse: f32 },
    /// Permanently armed until contact or chain reaction.
    Static,
}

#[derive(Component, Debug)]
pub struct Mine {
    pub kind: MineKind,
    /// Contact / blast radius.
    pub danger_radius: f32,
    pub blink_timer: f32,
    /// Warning state flips with the blink timer as the fuse shortens.
    pub blink_on: bool,
}

impl Mine {
    pub fn timed(fuse: f32, danger_radius: f32) -> Self {
        Self {
            kind: MineKind::Timed { fuse },
            danger_radius,
            blink_timer: 0.0,
            blink_on: false,
        }
    }

    pub fn fixed(danger_radius: f32) -> Self {
        Self {
            kind: MineKind::Static,
            danger_radius,
            blink_timer: 0.0,
            blink_on: false,
        }
    }

    /// Advance the blink countdown. Returns true when the visible warning
    /// state flipped so the sprite can follow.
    pub fn advance_blink(&mut self, dt: f32, period: f32) -> bool {
        self.blink_timer -= dt;
        if self.blink_timer > 0.0 {
            return false;
        }
        self.blink_timer = period;
        self.blink_on = !self.blink_on;
        true
    }
}

/// A chain-reaction detonation waiting for its stagger delay. The target is
/// re-checked for liveness when the delay expires, so a mine cleared by
/// phase cleanup cannot be detonated late.
#[derive(Debug, Clone, Copy)]
pub struct PendingDetonation {
    pub delay: f32,
    pub mine: Entity,
}

/// All minefield engine state: generation timers, spawn order for cap
/// eviction, and the staggered detonation queue.
#[derive(Resource, Debug, Default)]
pub struct MinefieldState {
    pub active: bool,
    /// Reentrancy guard: cleanup triggered twice in one frame (timeout plus
    /// forced reset) must run once.
    pub cleanup_in_progress: bool,
    pub hunt_timer: f32,
    pub field_timer: f32,
    pub pending: Vec<PendingDetonation>,
    pub order: VecDeque<Entity>,
}

impl MinefieldState {
    pub fn arm(&mut self, hunt_interval: f32, field_interval: f32) {
        self.active = true;
        self.cleanup_in_progress = false;
        self.hunt_timer = hunt_interval;
        self.field_timer = field_interval;
    }

    /// Whether this mine is still live (spawned and not yet detonated).
    pub fn is_live(&self, mine: Entity) -> bool {
        self.order.contains(&mine)
    }

    /// Mark a mine as gone. Returns false if it already was.
    pub fn retire(&mut self, mine: Entity) -> bool {
        if let Some(idx) = self.order.iter().position(|e| *e == mine) {
            self.order.remove(idx);
            true
        } else {
            false
        }
    }
}
