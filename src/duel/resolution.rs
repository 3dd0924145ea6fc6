//! Duel domain: pure round resolution.
//!
//! Kept free of ECS and RNG state so the weighting is testable with explicit
//! rolls.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelChoice {
    Rock,
    Paper,
    Scissors,
}

impl DuelChoice {
    pub const ALL: [DuelChoice; 3] = [DuelChoice::Rock, DuelChoice::Paper, DuelChoice::Scissors];

    pub fn beats(self, other: DuelChoice) -> bool {
        matches!(
            (self, other),
            (DuelChoice::Rock, DuelChoice::Scissors)
                | (DuelChoice::Paper, DuelChoice::Rock)
                | (DuelChoice::Scissors, DuelChoice::Paper)
        )
    }

    /// The choice that beats this one.
    pub fn counter(self) -> DuelChoice {
        match self {
            DuelChoice::Rock => DuelChoice::Paper,
            DuelChoice::Paper => DuelChoice::Scissors,
            DuelChoice::Scissors => DuelChoice::Rock,
        }
    }

    /// The choice this one beats.
    pub fn prey(self) -> DuelChoice {
        match self {
            DuelChoice::Rock => DuelChoice::Scissors,
            DuelChoice::Paper => DuelChoice::Rock,
            DuelChoice::Scissors => DuelChoice::Paper,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawOutcome {
    PlayerWin,
    BossWin,
    Tie,
}

/// Straight rock-paper-scissors, before any weighting.
pub fn classify(player: DuelChoice, boss: DuelChoice) -> RawOutcome {
    if player == boss {
        RawOutcome::Tie
    } else if player.beats(boss) {
        RawOutcome::PlayerWin
    } else {
        RawOutcome::BossWin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    PlayerWin,
    PlayerLoss,
}

/// Apply the duel's player-favoring weights to a raw outcome. `roll` is a
/// uniform sample in `[0, 1)`: ties convert to wins below `tie_win`, raw
/// wins survive below `keep_win`, raw losses flip below `flip_loss`.
pub fn resolve_weighted(
    raw: RawOutcome,
    tie_win: f64,
    keep_win: f64,
    flip_loss: f64,
    roll: f64,
) -> RoundOutcome {
    let player_wins = match raw {
        RawOutcome::Tie => roll < tie_win,
        RawOutcome::PlayerWin => roll < keep_win,
        RawOutcome::BossWin => roll < flip_loss,
    };
    if player_wins {
        RoundOutcome::PlayerWin
    } else {
        RoundOutcome::PlayerLoss
    }
}

/// Damage sent through the privileged path for a won round. The terminal
/// win carries the whole health pool so the boss zeroes out in the same
/// resolution step; earlier wins chip a fraction of max.
pub fn win_damage(final_win: bool, max_health: f32, win_fraction: f32) -> f32 {
    if final_win {
        max_health
    } else {
        max_health * win_fraction
    }
}

/// Synthesize a choice pair for a timed-out selection. The player's stand-in
/// choice wins with probability `win_bias`, so hesitation is punished gently
/// rather than harshly.
pub fn timeout_pair(win_bias: f64, rng: &mut impl Rng) -> (DuelChoice, DuelChoice) {
    let boss = DuelChoice::ALL[rng.random_range(0..DuelChoice::ALL.len())];
    let player = if rng.random_bool(win_bias) {
        boss.counter()
    } else {
        boss.prey()
    };
    (player, boss)
}
