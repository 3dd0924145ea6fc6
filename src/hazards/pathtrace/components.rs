//! Path-trace engine: path, trail, and sweep components plus engine state.

use bevy::prelude::*;

/// One round's path. The boss advances `index` along `waypoints` at `speed`.
#[derive(Component, Debug)]
pub struct TracePath {
    pub waypoints: Vec<Vec2>,
    pub index: usize,
    pub speed: f32,
}

/// A damaging dot dropped behind the boss during traversal.
#[derive(Component, Debug)]
pub struct TraceTrail {
    pub radius: f32,
}

/// Static marker showing the upcoming path during the preview.
#[derive(Component, Debug)]
pub struct PathPreviewMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAxis {
    /// A vertical line sweeping horizontally.
    Vertical,
    /// A horizontal line sweeping vertically.
    Horizontal,
}

/// One edge-to-edge sweeping line. Despawned once it leaves the far edge.
#[derive(Component, Debug)]
pub struct GridSweepLine {
    pub axis: SweepAxis,
    /// Signed speed along the sweep direction.
    pub velocity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceStage {
    #[default]
    Idle,
    /// The path is shown statically for memorization.
    Preview,
    /// The boss runs the path, dropping the trail.
    Traversal,
    /// Free-hit beat between rounds.
    Intermission,
}

#[derive(Resource, Debug, Default)]
pub struct PathTraceState {
    pub active: bool,
    /// Reentrancy guard, cleared when the engine re-arms.
    pub cleanup_in_progress: bool,
    /// Completed rounds so far.
    pub round: u32,
    /// Rounds this run needs; halved for filler runs.
    pub rounds_target: u32,
    pub stage: TraceStage,
    pub stage_timer: f32,
    pub grid_timer: f32,
    /// Where the last trail dot was dropped, to space the trail evenly.
    pub last_trail_pos: Option<Vec2>,
}

impl PathTraceState {
    pub fn arm(&mut self, rounds_target: u32, grid_interval: f32) {
        *self = Self {
            active: true,
            rounds_target: rounds_target.max(1),
            grid_timer: grid_interval,
            ..Self::default()
        };
    }

    /// Speed for the upcoming traversal; steps up every few rounds.
    pub fn round_speed(&self, base: f32, step: f32, rounds_per_step: u32) -> f32 {
        base + step * (self.round / rounds_per_step.max(1)) as f32
    }
}
