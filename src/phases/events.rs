//! Phases domain: transition messages between scheduler, engines, and duel.

use bevy::ecs::message::Message;

use crate::phases::types::{Phase, ScriptedKind};

/// A phase became active this frame. Engines arm themselves on this.
#[derive(Debug)]
pub struct PhaseStartedEvent {
    pub phase: Phase,
    pub filler: bool,
    /// Scheduler-owned duration; zero for round-driven phases (PathTrace)
    /// and the duel.
    pub duration: f32,
}

impl Message for PhaseStartedEvent {}

/// A phase stopped being active. Exactly one of these is emitted per exit;
/// engines run their idempotent cleanup on it.
#[derive(Debug)]
pub struct PhaseEndedEvent {
    pub phase: Phase,
    pub filler: bool,
    /// True when the phase was cut short (reset, defeat) rather than
    /// finishing on its own terms.
    pub aborted: bool,
}

impl Message for PhaseEndedEvent {}

/// Explicit external request to start a scripted phase. Ignored if the
/// scheduler is not hunting or the phase already ran.
#[derive(Debug)]
pub struct StartScriptedPhaseEvent {
    pub kind: ScriptedKind,
}

impl Message for StartScriptedPhaseEvent {}

/// The path-trace engine finished (all rounds) or aborted its sequence.
#[derive(Debug)]
pub struct PathTraceFinishedEvent {
    pub completed: bool,
}

impl Message for PathTraceFinishedEvent {}

/// A duel round was lost without ending the life pool; the scheduler owes
/// the player one filler phase before the duel resumes.
#[derive(Debug)]
pub struct DuelRoundLostEvent;

impl Message for DuelRoundLostEvent {}
