//! Duel domain: the round loop and its damage/life consequences.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::Rng;

use crate::boss::{Boss, BossHealth, DamageBossEvent, DamageSource};
use crate::core::{EncounterRng, EncounterTuning};
use crate::duel::resolution::{
    classify, resolve_weighted, timeout_pair, win_damage, DuelChoice, RoundOutcome,
};
use crate::duel::state::{DuelStage, DuelState};
use crate::encounter::EncounterResetEvent;
use crate::phases::{DuelRoundLostEvent, Phase, PhaseStartedEvent};
use crate::player::{InputClaim, LoseLifeEvent, Player, PlayerLives};
use crate::presentation::PresentationCueEvent;

const INPUT_OWNER: &str = "duel";

pub(crate) fn arm_duel(
    mut started: MessageReader<PhaseStartedEvent>,
    tuning: Res<EncounterTuning>,
    mut state: ResMut<DuelState>,
) {
    for event in started.read() {
        if event.phase != Phase::Duel {
            continue;
        }
        info!(
            "Duel begins at {} of {} wins",
            state.wins, tuning.duel.max_defeats
        );
        state.begin_round(tuning.duel.countdown);
    }
}

fn selection_input(keys: &ButtonInput<KeyCode>) -> Option<DuelChoice> {
    if keys.just_pressed(KeyCode::Digit1) {
        Some(DuelChoice::Rock)
    } else if keys.just_pressed(KeyCode::Digit2) {
        Some(DuelChoice::Paper)
    } else if keys.just_pressed(KeyCode::Digit3) {
        Some(DuelChoice::Scissors)
    } else {
        None
    }
}

/// Countdown → selection → weighted resolution → result. Wins damage the
/// boss through the privileged path; losses cost a life and hand the floor
/// to one filler phase.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_duel(
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    keys: Res<ButtonInput<KeyCode>>,
    mut rng: ResMut<EncounterRng>,
    mut state: ResMut<DuelState>,
    mut input_claim: ResMut<InputClaim>,
    lives: Res<PlayerLives>,
    mut damage: MessageWriter<DamageBossEvent>,
    mut life_loss: MessageWriter<LoseLifeEvent>,
    mut round_lost: MessageWriter<DuelRoundLostEvent>,
    mut cues: MessageWriter<PresentationCueEvent>,
    boss_query: Query<(&BossHealth, &Transform), With<Boss>>,
    player_query: Query<&Transform, (With<Player>, Without<Boss>)>,
) {
    if !state.active {
        return;
    }
    let Ok((boss_health, boss_transform)) = boss_query.single() else {
        return;
    };
    let dt = time.delta_secs();

    match state.stage {
        DuelStage::Countdown => {
            state.stage_timer -= dt;
            if state.stage_timer > 0.0 {
                return;
            }
            if !input_claim.claim(INPUT_OWNER) {
                // Someone else holds input; try again next frame rather
                // than opening a window the player cannot use.
                warn!("Duel could not claim input (held by {:?})", input_claim.owner());
                state.stage_timer = 0.0;
                return;
            }
            state.stage = DuelStage::Selection;
            state.stage_timer = tuning.duel.selection_window;
            state.player_choice = None;
        }
        DuelStage::Selection => {
            if state.player_choice.is_none() {
                state.player_choice = selection_input(&keys);
            }
            state.stage_timer -= dt;
            if state.player_choice.is_none() && state.stage_timer > 0.0 {
                return;
            }

            // Selection over, one way or the other: input goes back.
            input_claim.release();

            let duel = &tuning.duel;
            let (player, boss) = match state.player_choice {
                Some(choice) => (
                    choice,
                    DuelChoice::ALL[rng.0.random_range(0..DuelChoice::ALL.len())],
                ),
                None => timeout_pair(duel.timeout_win_bias, &mut rng.0),
            };
            let outcome = resolve_weighted(
                classify(player, boss),
                duel.tie_win_chance,
                duel.keep_win_chance,
                duel.flip_loss_chance,
                rng.0.random(),
            );
            info!("Duel round: {:?} vs {:?} -> {:?}", player, boss, outcome);

            match outcome {
                RoundOutcome::PlayerWin => {
                    let final_win = state.record_win(duel.max_defeats);
                    damage.write(DamageBossEvent {
                        amount: win_damage(final_win, boss_health.max, duel.win_damage_fraction),
                        source: DamageSource::Duel,
                    });
                    cues.write(PresentationCueEvent::flash(
                        "duel_win",
                        Color::srgb(0.9, 0.9, 0.2),
                        1.0,
                        boss_transform.translation.truncate(),
                    ));
                    if final_win {
                        info!("Duel won {} times; boss falls", state.wins);
                        state.suspend();
                        return;
                    }
                }
                RoundOutcome::PlayerLoss => {
                    life_loss.write(LoseLifeEvent);
                    if let Ok(player_transform) = player_query.single() {
                        cues.write(PresentationCueEvent::flash(
                            "duel_loss",
                            Color::srgb(0.9, 0.2, 0.2),
                            1.0,
                            player_transform.translation.truncate(),
                        ));
                    }
                    // On the last life the defeat flow takes over; no
                    // filler should start under it.
                    if lives.remaining > 1 {
                        round_lost.write(DuelRoundLostEvent);
                        state.suspend();
                        return;
                    }
                }
            }

            state.stage = DuelStage::Result;
            state.stage_timer = duel.result_delay;
        }
        DuelStage::Result => {
            state.stage_timer -= dt;
            if state.stage_timer <= 0.0 {
                state.begin_round(tuning.duel.countdown);
            }
        }
    }
}

/// A forced reset drops the whole duel, wins included, and releases input
/// if the selection window held it.
pub(crate) fn pause_on_reset(
    mut resets: MessageReader<EncounterResetEvent>,
    mut state: ResMut<DuelState>,
    mut input_claim: ResMut<InputClaim>,
) {
    if resets.read().next().is_some() {
        if input_claim.owner() == Some(INPUT_OWNER) {
            input_claim.release();
        }
        state.reset();
    }
}

pub(crate) fn teardown_duel(mut state: ResMut<DuelState>, mut input_claim: ResMut<InputClaim>) {
    if input_claim.owner() == Some(INPUT_OWNER) {
        input_claim.release();
    }
    state.reset();
}
