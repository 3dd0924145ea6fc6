//! Hazards domain: the procedural hazard engines.
//!
//! Each engine owns its collections and timers in a resource, arms itself on
//! `PhaseStartedEvent`, and clears everything on `PhaseEndedEvent` or a
//! forced reset. No engine touches another engine's state.

pub mod bullets;
pub mod minefield;
pub mod pathtrace;
mod placement;
pub mod summoning;
#[cfg(test)]
mod tests;

pub use placement::resolve_separated_position;

use bevy::prelude::*;
use std::collections::VecDeque;

/// Despawn oldest entries until the collection fits its cap. Hazard
/// collections are bounded; exceeding the cap evicts rather than grows.
pub(crate) fn evict_overflow(order: &mut VecDeque<Entity>, cap: usize, commands: &mut Commands) {
    while order.len() > cap {
        if let Some(oldest) = order.pop_front() {
            commands.entity(oldest).despawn();
        }
    }
}
