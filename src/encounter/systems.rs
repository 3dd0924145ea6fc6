//! Encounter domain: boss lifecycle, reset flow, and defeat finalization.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::boss::{Boss, BossDefeatedEvent, BossHealth, BossMovement, Immunity};
use crate::core::{ArenaBounds, EncounterTuning, GameState};
use crate::encounter::EncounterResetEvent;
use crate::phases::{Phase, PhaseEndedEvent, PhaseScheduler, PhaseStartedEvent};
use crate::player::{
    GameLayer, HazardSource, Player, PlayerHealth, PlayerHitEvent, PlayerLives,
};
use crate::score::ScoreEvent;

const VICTORY_BONUS: u64 = 10_000;

/// Pending victory-screen transition after the killing blow.
#[derive(Resource, Debug, Default)]
pub struct VictoryCountdown {
    pub timer: Option<f32>,
}

pub(crate) fn spawn_boss(
    mut commands: Commands,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
) {
    let spawn = Vec2::new(0.0, bounds.half_extents().y * 0.5);
    commands.spawn((
        Boss,
        BossHealth::new(tuning.boss.max_health),
        Immunity::default(),
        BossMovement::new(tuning.boss.base_speed),
        Sprite {
            color: Color::srgb(0.8, 0.2, 0.3),
            custom_size: Some(Vec2::splat(tuning.boss.radius * 2.0)),
            ..default()
        },
        Transform::from_xyz(spawn.x, spawn.y, 1.0),
        (
            RigidBody::Dynamic,
            Collider::circle(tuning.boss.radius),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0),
            CollisionLayers::new(GameLayer::Boss, [GameLayer::Player]),
        ),
    ));
    info!(
        "Boss spawned: {:.0} health, {:.0} base speed",
        tuning.boss.max_health, tuning.boss.base_speed
    );
}

pub(crate) fn start_intro(
    tuning: Res<EncounterTuning>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut countdown: ResMut<VictoryCountdown>,
    mut started: MessageWriter<PhaseStartedEvent>,
) {
    countdown.timer = None;
    scheduler.begin(tuning.phases.intro_duration);
    started.write(PhaseStartedEvent {
        phase: Phase::Intro,
        filler: false,
        duration: tuning.phases.intro_duration,
    });
}

/// Body contact with a live boss hurts; iframes keep it from stunlocking.
pub(crate) fn boss_contact_damage(
    tuning: Res<EncounterTuning>,
    mut hits: MessageWriter<PlayerHitEvent>,
    boss_query: Query<(&BossHealth, &Transform), With<Boss>>,
    player_query: Query<&Transform, (With<Player>, Without<Boss>)>,
) {
    let (Ok((health, boss_transform)), Ok(player_transform)) =
        (boss_query.single(), player_query.single())
    else {
        return;
    };
    if !health.active {
        return;
    }
    let gap = boss_transform
        .translation
        .truncate()
        .distance(player_transform.translation.truncate());
    if gap < tuning.boss.radius + tuning.player.radius {
        hits.write(PlayerHitEvent {
            amount: tuning.boss.contact_damage,
            source: HazardSource::BossContact,
        });
    }
}

/// Award the bonus on the killing blow, then hold briefly before the
/// victory screen so the final beat is visible.
pub(crate) fn finalize_victory(
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    mut defeated: MessageReader<BossDefeatedEvent>,
    mut countdown: ResMut<VictoryCountdown>,
    mut score: MessageWriter<ScoreEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if defeated.read().next().is_some() && countdown.timer.is_none() {
        score.write(ScoreEvent {
            points: VICTORY_BONUS,
            reason: "boss defeated",
        });
        countdown.timer = Some(tuning.boss.victory_delay);
    }

    if let Some(timer) = countdown.timer.as_mut() {
        *timer -= time.delta_secs();
        if *timer <= 0.0 {
            countdown.timer = None;
            next_state.set(GameState::Victory);
        }
    }
}

/// Forced reset: abort the active phase, restore both actors, and restart
/// the intro. Engines clear their own collections off the same message.
#[allow(clippy::too_many_arguments)]
pub(crate) fn handle_reset(
    mut resets: MessageReader<EncounterResetEvent>,
    tuning: Res<EncounterTuning>,
    bounds: Res<ArenaBounds>,
    mut scheduler: ResMut<PhaseScheduler>,
    mut lives: ResMut<PlayerLives>,
    mut countdown: ResMut<VictoryCountdown>,
    mut started: MessageWriter<PhaseStartedEvent>,
    mut ended: MessageWriter<PhaseEndedEvent>,
    mut boss_query: Query<
        (&mut BossHealth, &mut Immunity, &mut BossMovement, &mut Transform),
        With<Boss>,
    >,
    mut player_query: Query<(&mut PlayerHealth, &mut Transform), (With<Player>, Without<Boss>)>,
) {
    if resets.read().next().is_none() {
        return;
    }
    warn!("Encounter reset");

    // The active phase ends aborted so engines see a normal exit.
    if let Some(crate::phases::SchedulerEvent::Ended {
        phase,
        filler,
        aborted,
    }) = scheduler.finish_active(true, 0.0)
    {
        ended.write(PhaseEndedEvent {
            phase,
            filler,
            aborted,
        });
    }

    scheduler.begin(tuning.phases.intro_duration);
    countdown.timer = None;

    if let Ok((mut health, mut immunity, mut movement, mut transform)) = boss_query.single_mut() {
        *health = BossHealth::new(tuning.boss.max_health);
        *immunity = Immunity::default();
        *movement = BossMovement::new(tuning.boss.base_speed);
        let spawn = Vec2::new(0.0, bounds.half_extents().y * 0.5);
        transform.translation.x = spawn.x;
        transform.translation.y = spawn.y;
    }
    if let Ok((mut health, mut transform)) = player_query.single_mut() {
        health.refill();
        transform.translation.x = 0.0;
        transform.translation.y = -200.0;
    }
    lives.remaining = tuning.player.lives;

    started.write(PhaseStartedEvent {
        phase: Phase::Intro,
        filler: false,
        duration: tuning.phases.intro_duration,
    });
}
