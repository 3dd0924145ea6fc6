//! Player domain: components and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    Player,
    Boss,
}

#[derive(Component, Debug)]
pub struct Player;

/// Health pool; depleting it costs one life, not the run.
#[derive(Component, Debug, Clone)]
pub struct PlayerHealth {
    pub current: f32,
    pub max: f32,
}

impl PlayerHealth {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

/// Post-hit invulnerability frames.
#[derive(Component, Debug, Default)]
pub struct PlayerInvulnerable {
    pub timer: f32,
}

impl PlayerInvulnerable {
    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }
}

/// Protection granted by a collected shield pickup.
#[derive(Component, Debug, Default)]
pub struct PlayerShield {
    pub timer: f32,
}

impl PlayerShield {
    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }
}
