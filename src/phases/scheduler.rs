//! Phases domain: scheduler state and transition rules.

use bevy::prelude::*;
use rand::Rng;

use crate::phases::types::{Phase, ScriptedKind};

/// What a scheduler step resolved to. The driving system turns these into
/// phase messages for the engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulerEvent {
    /// The active phase ran out (or was finished explicitly).
    Ended {
        phase: Phase,
        filler: bool,
        aborted: bool,
    },
    /// All scripted phases are spent; the duel begins.
    DuelEntered,
}

/// Canonical phase sequencing: `Intro → Hunting ⇄ {Summoning, Minefield,
/// Bullets} → PathTrace(×rounds) → Duel → {Victory | filler → Duel}`.
///
/// Scripted phases run exactly once; fillers re-run them with shortened
/// timers, capped per kind. All transitions funnel through this resource so
/// at most one non-Hunting phase can ever be active.
#[derive(Resource, Debug)]
pub struct PhaseScheduler {
    current: Phase,
    /// Remaining time in the current timed phase. Unused for PathTrace
    /// (round-driven) and the duel.
    pub phase_timer: f32,
    /// Forced-vulnerable window after a scripted phase ends.
    pub vulnerable_timer: f32,
    is_filler: bool,
    scripted_done: [bool; 4],
    filler_uses: [u8; 4],
    duel_reached: bool,
    /// Set while a transition is being resolved this frame; start requests
    /// arriving mid-transition are ignored rather than queued.
    transitioning: bool,
}

impl Default for PhaseScheduler {
    fn default() -> Self {
        Self {
            current: Phase::Intro,
            phase_timer: 0.0,
            vulnerable_timer: 0.0,
            is_filler: false,
            scripted_done: [false; 4],
            filler_uses: [0; 4],
            duel_reached: false,
            transitioning: false,
        }
    }
}

impl PhaseScheduler {
    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn is_filler(&self) -> bool {
        self.is_filler
    }

    pub fn duel_reached(&self) -> bool {
        self.duel_reached
    }

    pub fn scripted_done(&self, kind: ScriptedKind) -> bool {
        self.scripted_done[kind.index()]
    }

    pub fn all_scripted_done(&self) -> bool {
        self.scripted_done.iter().all(|d| *d)
    }

    pub fn filler_uses(&self, kind: ScriptedKind) -> u8 {
        self.filler_uses[kind.index()]
    }

    /// True while the active phase claims boss immunity. An open
    /// vulnerability window overrides it, so the free-hit beats between
    /// path-trace rounds work even though the phase is still running.
    pub fn phase_forces_immunity(&self) -> bool {
        self.current.forces_immunity() && self.vulnerable_timer <= 0.0
    }

    pub fn in_vulnerability_window(&self) -> bool {
        self.vulnerable_timer > 0.0
    }

    /// Arm the intro beat. Called once when the encounter starts and again
    /// on a full reset.
    pub fn begin(&mut self, intro_duration: f32) {
        *self = Self::default();
        self.phase_timer = intro_duration;
    }

    /// Start a scripted phase from Hunting. Returns false (and does
    /// nothing) for repeats, mid-transition requests, or anything after the
    /// duel has been reached.
    pub fn try_start_scripted(&mut self, kind: ScriptedKind, duration: f32) -> bool {
        if self.transitioning
            || self.duel_reached
            || self.current != Phase::Hunting
            || self.scripted_done[kind.index()]
        {
            return false;
        }
        self.scripted_done[kind.index()] = true;
        self.current = kind.phase();
        self.phase_timer = duration;
        self.vulnerable_timer = 0.0;
        self.is_filler = false;
        true
    }

    /// Start a duel-loss filler phase. Only legal from the duel itself.
    pub fn try_start_filler(&mut self, kind: ScriptedKind, duration: f32, max_uses: u8) -> bool {
        if self.transitioning
            || self.current != Phase::Duel
            || self.filler_uses[kind.index()] >= max_uses
        {
            return false;
        }
        self.filler_uses[kind.index()] += 1;
        self.current = kind.phase();
        self.phase_timer = duration;
        self.vulnerable_timer = 0.0;
        self.is_filler = true;
        true
    }

    /// Open a vulnerability window without ending the active phase. Used
    /// for the free-hit beat after each path-trace round.
    pub fn grant_vulnerability(&mut self, window: f32) {
        self.vulnerable_timer = self.vulnerable_timer.max(window);
    }

    /// Pick a filler kind with remaining uses, uniformly.
    pub fn pick_filler(&self, rng: &mut impl Rng, max_uses: u8) -> Option<ScriptedKind> {
        let candidates: Vec<ScriptedKind> = ScriptedKind::ALL
            .into_iter()
            .filter(|k| self.filler_uses[k.index()] < max_uses)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }

    /// Advance timers one frame. At most one transition resolves per tick,
    /// and it resolves here, before any engine reads the current phase.
    pub fn tick(&mut self, dt: f32, vulnerability_window: f32) -> Option<SchedulerEvent> {
        self.transitioning = false;

        if self.vulnerable_timer > 0.0 {
            self.vulnerable_timer = (self.vulnerable_timer - dt).max(0.0);
            // The duel starts only once the last vulnerability window has
            // played out, so the player always gets the free-hit beat.
            if self.vulnerable_timer == 0.0
                && self.current == Phase::Hunting
                && self.all_scripted_done()
                && !self.duel_reached
            {
                self.enter_duel();
                return Some(SchedulerEvent::DuelEntered);
            }
        }

        // PathTrace is round-driven and the duel paces itself; everything
        // else runs on the scheduler's own clock.
        let timed = matches!(
            self.current,
            Phase::Intro | Phase::Summoning | Phase::Minefield | Phase::Bullets
        );
        if timed {
            self.phase_timer -= dt;
            if self.phase_timer <= 0.0 {
                return self.finish_active(false, vulnerability_window);
            }
        }

        None
    }

    /// End the active phase. Idempotent within a frame: once the phase has
    /// flipped, duplicate end triggers (timeout plus explicit cancel) find
    /// nothing to end and no-op.
    pub fn finish_active(
        &mut self,
        aborted: bool,
        vulnerability_window: f32,
    ) -> Option<SchedulerEvent> {
        if self.transitioning {
            return None;
        }
        let ended = self.current;
        match ended {
            Phase::Hunting | Phase::Duel => return None,
            _ => {}
        }

        self.transitioning = true;
        let filler = self.is_filler;
        self.is_filler = false;
        self.phase_timer = 0.0;

        if filler {
            // Fillers return straight to the duel countdown; no free-hit
            // window, the duel keeps its own immunity rules.
            self.current = Phase::Duel;
        } else {
            self.current = Phase::Hunting;
            self.vulnerable_timer = vulnerability_window;
        }

        Some(SchedulerEvent::Ended {
            phase: ended,
            filler,
            aborted,
        })
    }

    fn enter_duel(&mut self) {
        self.current = Phase::Duel;
        self.duel_reached = true;
        self.is_filler = false;
        self.phase_timer = 0.0;
    }

    /// Count of active special phases; by construction 0 or 1. Kept as a
    /// method so tests can assert the invariant directly.
    pub fn active_special_count(&self) -> usize {
        match self.current {
            Phase::Intro | Phase::Hunting => 0,
            _ => 1,
        }
    }
}
