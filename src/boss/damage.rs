//! Boss domain: the damage & immunity model.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::Rng;

use crate::boss::components::{Boss, BossHealth, Immunity};
use crate::boss::events::{
    BossDamagedEvent, BossDefeatedEvent, DamageBossEvent, DamageSource, EmergencySummonEvent,
    HealthThresholdEvent,
};
use crate::core::{EncounterRng, EncounterTuning};
use crate::phases::PhaseScheduler;

/// Regular damage is scaled down and floored so hit counts stay predictable
/// (a 100-damage shot at 0.4 always lands exactly 40).
pub fn resolve_regular_damage(amount: f32, scale: f32) -> f32 {
    (amount * scale).floor().max(0.0)
}

/// Thresholds crossed when health moves from `before` to `after`, both as
/// fractions of max health.
pub(crate) fn crossed_thresholds(before: f32, after: f32, thresholds: &[f32]) -> Vec<f32> {
    thresholds
        .iter()
        .copied()
        .filter(|t| before > *t && after <= *t)
        .collect()
}

pub(crate) fn tick_immunity(time: Res<Time>, mut query: Query<&mut Immunity, With<Boss>>) {
    for mut immunity in &mut query {
        immunity.tick(time.delta_secs());
    }
}

/// Resolve every damage request against the immunity rules. Rejected hits
/// still produce a `BossDamagedEvent` with zero applied so the caller can
/// tell the shot bounced.
pub(crate) fn apply_boss_damage(
    mut requests: MessageReader<DamageBossEvent>,
    mut damaged: MessageWriter<BossDamagedEvent>,
    mut thresholds_out: MessageWriter<HealthThresholdEvent>,
    mut defeated: MessageWriter<BossDefeatedEvent>,
    mut summons: MessageWriter<EmergencySummonEvent>,
    scheduler: Res<PhaseScheduler>,
    tuning: Res<EncounterTuning>,
    mut rng: ResMut<EncounterRng>,
    mut query: Query<(&mut BossHealth, &Immunity), With<Boss>>,
) {
    let Ok((mut health, immunity)) = query.single_mut() else {
        return;
    };

    for request in requests.read() {
        let rejected = !health.active
            || health.is_dead()
            || (request.source == DamageSource::Weapon
                && (immunity.is_immune() || scheduler.phase_forces_immunity()));

        if rejected {
            damaged.write(BossDamagedEvent {
                applied: 0.0,
                remaining: health.current,
            });
            continue;
        }

        let amount = match request.source {
            DamageSource::Weapon => {
                resolve_regular_damage(request.amount, tuning.damage.regular_scale)
            }
            // The privileged duel path lands raw so duel wins always count.
            DamageSource::Duel => request.amount,
        };

        let before = health.fraction();
        let applied = health.deplete(amount);
        let after = health.fraction();

        damaged.write(BossDamagedEvent {
            applied,
            remaining: health.current,
        });
        debug!(
            "Boss took {:.0} ({:?}), {:.0}/{:.0} left",
            applied, request.source, health.current, health.max
        );

        for threshold in crossed_thresholds(before, after, &tuning.damage.thresholds) {
            info!("Boss health crossed {:.0}%", threshold * 100.0);
            thresholds_out.write(HealthThresholdEvent { threshold });

            if threshold <= tuning.damage.emergency_summon_below
                && rng.0.random_bool(tuning.damage.emergency_summon_chance)
            {
                summons.write(EmergencySummonEvent);
            }
        }

        if health.is_dead() {
            health.active = false;
            defeated.write(BossDefeatedEvent);
        }
    }
}
