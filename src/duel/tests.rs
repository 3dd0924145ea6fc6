//! Duel domain: resolution weighting and win-counter tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::resolution::{
    classify, resolve_weighted, timeout_pair, win_damage, DuelChoice, RawOutcome, RoundOutcome,
};
use super::state::{DuelStage, DuelState};
use crate::boss::BossHealth;

// -----------------------------------------------------------------------------
// Raw classification
// -----------------------------------------------------------------------------

#[test]
fn test_classify_covers_the_cycle() {
    use DuelChoice::*;
    assert_eq!(classify(Rock, Scissors), RawOutcome::PlayerWin);
    assert_eq!(classify(Paper, Rock), RawOutcome::PlayerWin);
    assert_eq!(classify(Scissors, Paper), RawOutcome::PlayerWin);
    assert_eq!(classify(Scissors, Rock), RawOutcome::BossWin);
    for choice in DuelChoice::ALL {
        assert_eq!(classify(choice, choice), RawOutcome::Tie);
        assert!(choice.counter().beats(choice));
        assert!(choice.beats(choice.prey()));
    }
}

// -----------------------------------------------------------------------------
// Weighted resolution (explicit rolls, no RNG)
// -----------------------------------------------------------------------------

/// A tie with a roll under the tie weight resolves as a player win; over
/// it, as a loss.
#[test]
fn test_tie_weighting_cuts_at_seventy_percent() {
    let resolve = |roll| resolve_weighted(RawOutcome::Tie, 0.7, 0.85, 0.4, roll);
    assert_eq!(resolve(0.0), RoundOutcome::PlayerWin);
    assert_eq!(resolve(0.699), RoundOutcome::PlayerWin);
    assert_eq!(resolve(0.7), RoundOutcome::PlayerLoss);
    assert_eq!(resolve(0.999), RoundOutcome::PlayerLoss);
}

#[test]
fn test_raw_win_is_kept_below_the_keep_weight() {
    let resolve = |roll| resolve_weighted(RawOutcome::PlayerWin, 0.7, 0.85, 0.4, roll);
    assert_eq!(resolve(0.84), RoundOutcome::PlayerWin);
    assert_eq!(resolve(0.85), RoundOutcome::PlayerLoss);
}

#[test]
fn test_raw_loss_flips_below_the_flip_weight() {
    let resolve = |roll| resolve_weighted(RawOutcome::BossWin, 0.7, 0.85, 0.4, roll);
    assert_eq!(resolve(0.39), RoundOutcome::PlayerWin);
    assert_eq!(resolve(0.4), RoundOutcome::PlayerLoss);
}

/// Timeouts synthesize a decided pair whose win rate tracks the bias.
#[test]
fn test_timeout_pair_is_never_a_tie_and_favors_the_player() {
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let mut wins = 0u32;
    let trials = 2000;
    for _ in 0..trials {
        let (player, boss) = timeout_pair(0.6, &mut rng);
        match classify(player, boss) {
            RawOutcome::Tie => panic!("timeout pair must be decided"),
            RawOutcome::PlayerWin => wins += 1,
            RawOutcome::BossWin => {}
        }
    }
    let rate = wins as f64 / trials as f64;
    assert!((0.55..0.65).contains(&rate), "win rate {rate} off the bias");
}

// -----------------------------------------------------------------------------
// Win counter and round state
// -----------------------------------------------------------------------------

#[test]
fn test_wins_cap_at_max_defeats() {
    let mut state = DuelState::default();
    assert!(!state.record_win(3));
    assert!(!state.record_win(3));
    assert!(state.record_win(3));
    // Extra wins saturate instead of overshooting.
    assert!(state.record_win(3));
    assert_eq!(state.wins, 3);
}

/// Reaching the win cap sends the whole health pool through the privileged
/// path, so the boss zeroes out in the same round that capped the counter.
#[test]
fn test_final_win_sends_boss_zeroing_damage() {
    let mut state = DuelState::default();
    assert_eq!(win_damage(state.record_win(3), 5000.0, 0.01), 50.0);
    assert_eq!(win_damage(state.record_win(3), 5000.0, 0.01), 50.0);

    let final_win = state.record_win(3);
    assert!(final_win);
    let amount = win_damage(final_win, 5000.0, 0.01);
    assert_eq!(amount, 5000.0);

    let mut health = BossHealth::new(5000.0);
    health.deplete(amount);
    assert!(health.is_dead());
}

#[test]
fn test_wins_survive_suspension_but_not_reset() {
    let mut state = DuelState::default();
    state.begin_round(3.0);
    state.record_win(3);

    state.suspend();
    assert!(!state.active);
    state.begin_round(3.0);
    assert_eq!(state.wins, 1, "filler phases must not eat duel wins");
    assert_eq!(state.stage, DuelStage::Countdown);

    state.reset();
    assert_eq!(state.wins, 0);
}

#[test]
fn test_begin_round_clears_the_previous_selection() {
    let mut state = DuelState::default();
    state.player_choice = Some(DuelChoice::Rock);
    state.begin_round(3.0);
    assert!(state.player_choice.is_none());
    assert_eq!(state.stage_timer, 3.0);
}
