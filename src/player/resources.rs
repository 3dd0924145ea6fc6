//! Player domain: lives, speed modifier, and the input claim.

use bevy::prelude::*;

#[derive(Resource, Debug)]
pub struct PlayerLives {
    pub remaining: u32,
}

impl Default for PlayerLives {
    fn default() -> Self {
        Self { remaining: 3 }
    }
}

/// Temporary movement-speed modifier. The path-trace phase sets a slow
/// factor for its whole duration and must restore it on every exit path.
#[derive(Resource, Debug)]
pub struct PlayerSpeedMod {
    pub factor: f32,
}

impl Default for PlayerSpeedMod {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl PlayerSpeedMod {
    pub fn set(&mut self, factor: f32) {
        self.factor = factor;
    }

    /// Restore normal speed. Idempotent so abnormal exits can call it
    /// unconditionally.
    pub fn restore(&mut self) {
        self.factor = 1.0;
    }
}

/// Exclusive claim on player input. While claimed, normal movement input is
/// ignored and the claimant (the duel's selection window) reads it instead.
#[derive(Resource, Debug, Default)]
pub struct InputClaim {
    owner: Option<String>,
}

impl InputClaim {
    pub fn claim(&mut self, owner: impl Into<String>) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(owner.into());
        true
    }

    /// Release regardless of owner. Idempotent.
    pub fn release(&mut self) {
        self.owner = None;
    }

    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}
