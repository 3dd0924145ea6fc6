//! Phases domain: scheduler transition tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::scheduler::{PhaseScheduler, SchedulerEvent};
use super::types::{Phase, ScriptedKind};

const VULN: f32 = 3.0;

fn scheduler_in_hunting() -> PhaseScheduler {
    let mut scheduler = PhaseScheduler::default();
    scheduler.begin(1.0);
    // Run out the intro and its vulnerability window.
    scheduler.tick(1.5, VULN);
    scheduler.tick(VULN + 0.1, VULN);
    assert_eq!(scheduler.current(), Phase::Hunting);
    scheduler
}

/// Drive the scheduler through all four scripted phases to the duel.
fn run_full_script(scheduler: &mut PhaseScheduler) {
    for kind in [
        ScriptedKind::Summoning,
        ScriptedKind::Minefield,
        ScriptedKind::Bullets,
    ] {
        assert!(scheduler.try_start_scripted(kind, 10.0));
        assert!(matches!(
            scheduler.tick(10.5, VULN),
            Some(SchedulerEvent::Ended { .. })
        ));
        scheduler.tick(VULN + 0.1, VULN);
        assert_eq!(scheduler.current(), Phase::Hunting);
    }
    assert!(scheduler.try_start_scripted(ScriptedKind::PathTrace, 0.0));
}

// -----------------------------------------------------------------------------
// Scripted sequence
// -----------------------------------------------------------------------------

#[test]
fn test_intro_leads_to_hunting_with_vulnerability() {
    let mut scheduler = PhaseScheduler::default();
    scheduler.begin(2.0);
    assert_eq!(scheduler.current(), Phase::Intro);
    assert!(scheduler.phase_forces_immunity());

    let event = scheduler.tick(2.5, VULN);
    assert!(matches!(
        event,
        Some(SchedulerEvent::Ended {
            phase: Phase::Intro,
            filler: false,
            aborted: false,
        })
    ));
    assert_eq!(scheduler.current(), Phase::Hunting);
    assert!(scheduler.in_vulnerability_window());
    assert!(!scheduler.phase_forces_immunity());
}

#[test]
fn test_scripted_phase_runs_exactly_once() {
    let mut scheduler = scheduler_in_hunting();
    assert!(scheduler.try_start_scripted(ScriptedKind::Minefield, 25.0));
    assert_eq!(scheduler.current(), Phase::Minefield);

    scheduler.tick(26.0, VULN);
    scheduler.tick(VULN + 0.1, VULN);
    assert_eq!(scheduler.current(), Phase::Hunting);

    // Second start of the same kind is ignored.
    assert!(!scheduler.try_start_scripted(ScriptedKind::Minefield, 25.0));
    assert_eq!(scheduler.current(), Phase::Hunting);
}

#[test]
fn test_start_rejected_while_phase_active() {
    let mut scheduler = scheduler_in_hunting();
    assert!(scheduler.try_start_scripted(ScriptedKind::Summoning, 12.0));
    // A second engine cannot claim the boss mid-phase.
    assert!(!scheduler.try_start_scripted(ScriptedKind::Bullets, 90.0));
    assert_eq!(scheduler.active_special_count(), 1);
}

#[test]
fn test_at_most_one_special_phase_active() {
    let mut scheduler = scheduler_in_hunting();
    assert_eq!(scheduler.active_special_count(), 0);
    scheduler.try_start_scripted(ScriptedKind::Bullets, 90.0);
    assert_eq!(scheduler.active_special_count(), 1);
    for _ in 0..200 {
        scheduler.tick(1.0, VULN);
        assert!(scheduler.active_special_count() <= 1);
    }
}

// -----------------------------------------------------------------------------
// Scenario D: path trace completion leads to the duel, nothing else
// -----------------------------------------------------------------------------

#[test]
fn test_pathtrace_completion_enters_duel() {
    let mut scheduler = scheduler_in_hunting();
    run_full_script(&mut scheduler);
    assert_eq!(scheduler.current(), Phase::PathTrace);

    // The engine reports completion after its ten rounds.
    let event = scheduler.finish_active(false, VULN);
    assert!(matches!(
        event,
        Some(SchedulerEvent::Ended {
            phase: Phase::PathTrace,
            ..
        })
    ));
    assert_eq!(scheduler.current(), Phase::Hunting);
    assert!(scheduler.all_scripted_done());

    // Once the vulnerability window plays out, the duel is entered, not a
    // repeat of any hazard phase.
    let event = scheduler.tick(VULN + 0.1, VULN);
    assert_eq!(event, Some(SchedulerEvent::DuelEntered));
    assert_eq!(scheduler.current(), Phase::Duel);
    assert!(scheduler.duel_reached());

    // And the duel is irrevocable: no scripted phase can start anymore.
    assert!(!scheduler.try_start_scripted(ScriptedKind::Summoning, 12.0));
}

/// Between path-trace rounds the boss gets a free-hit window without the
/// phase ending, and its expiry never jumps to the duel mid-phase.
#[test]
fn test_round_vulnerability_overrides_phase_immunity() {
    let mut scheduler = scheduler_in_hunting();
    run_full_script(&mut scheduler);
    assert!(scheduler.phase_forces_immunity());

    scheduler.grant_vulnerability(VULN);
    assert!(scheduler.in_vulnerability_window());
    assert!(!scheduler.phase_forces_immunity());

    let event = scheduler.tick(VULN + 0.1, VULN);
    assert_eq!(event, None);
    assert_eq!(scheduler.current(), Phase::PathTrace);
    assert!(scheduler.phase_forces_immunity());
}

#[test]
fn test_aborted_pathtrace_still_ends_phase() {
    let mut scheduler = scheduler_in_hunting();
    run_full_script(&mut scheduler);

    let event = scheduler.finish_active(true, VULN);
    assert!(matches!(
        event,
        Some(SchedulerEvent::Ended { aborted: true, .. })
    ));
    // Abort leaves the boss immediately vulnerable.
    assert!(scheduler.in_vulnerability_window());
    assert!(!scheduler.phase_forces_immunity());
}

// -----------------------------------------------------------------------------
// Scenario E: duel-loss fillers
// -----------------------------------------------------------------------------

fn scheduler_in_duel() -> PhaseScheduler {
    let mut scheduler = scheduler_in_hunting();
    run_full_script(&mut scheduler);
    scheduler.finish_active(false, VULN);
    scheduler.tick(VULN + 0.1, VULN);
    assert_eq!(scheduler.current(), Phase::Duel);
    scheduler
}

#[test]
fn test_filler_runs_once_then_returns_to_duel() {
    let mut scheduler = scheduler_in_duel();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    assert!(scheduler.pick_filler(&mut rng, 3).is_some());

    let kind = ScriptedKind::Bullets;
    assert!(scheduler.try_start_filler(kind, 6.0, 3));
    assert!(scheduler.is_filler());
    assert_eq!(scheduler.filler_uses(kind), 1);

    let event = scheduler.tick(6.5, VULN);
    assert!(matches!(
        event,
        Some(SchedulerEvent::Ended { filler: true, .. })
    ));
    // Filler exits go straight back to the duel, no free-hit window.
    assert_eq!(scheduler.current(), Phase::Duel);
    assert!(!scheduler.in_vulnerability_window());
}

#[test]
fn test_filler_pool_caps_per_kind() {
    let mut scheduler = scheduler_in_duel();

    for use_count in 1..=3 {
        assert!(scheduler.try_start_filler(ScriptedKind::Minefield, 6.0, 3));
        assert_eq!(scheduler.filler_uses(ScriptedKind::Minefield), use_count);
        scheduler.tick(6.5, VULN);
        assert_eq!(scheduler.current(), Phase::Duel);
        // Next frame clears the transition guard.
        scheduler.tick(0.0, VULN);
    }
    // Fourth use is over the cap.
    assert!(!scheduler.try_start_filler(ScriptedKind::Minefield, 6.0, 3));
}

#[test]
fn test_pick_filler_skips_exhausted_kinds() {
    let mut scheduler = scheduler_in_duel();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // Exhaust everything except Bullets. PathTrace is round-driven, so end
    // each filler explicitly instead of waiting out a timer.
    for kind in [
        ScriptedKind::Summoning,
        ScriptedKind::Minefield,
        ScriptedKind::PathTrace,
    ] {
        for _ in 0..3 {
            assert!(scheduler.try_start_filler(kind, 1.0, 3));
            scheduler.finish_active(false, VULN);
            scheduler.tick(0.0, VULN);
        }
    }

    for _ in 0..20 {
        assert_eq!(
            scheduler.pick_filler(&mut rng, 3),
            Some(ScriptedKind::Bullets)
        );
    }

    for _ in 0..3 {
        assert!(scheduler.try_start_filler(ScriptedKind::Bullets, 1.0, 3));
        scheduler.finish_active(false, VULN);
        scheduler.tick(0.0, VULN);
    }
    assert_eq!(scheduler.pick_filler(&mut rng, 3), None);
}

// -----------------------------------------------------------------------------
// Duplicate-trigger tolerance
// -----------------------------------------------------------------------------

#[test]
fn test_double_finish_is_ignored() {
    let mut scheduler = scheduler_in_hunting();
    scheduler.try_start_scripted(ScriptedKind::Summoning, 12.0);

    let first = scheduler.finish_active(false, VULN);
    assert!(first.is_some());
    // A second trigger in the same frame finds no phase to end.
    let second = scheduler.finish_active(false, VULN);
    assert!(second.is_none());
    assert_eq!(scheduler.current(), Phase::Hunting);
}
