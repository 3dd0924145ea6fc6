//! Summoning engine: staggered wave emission.
//!
//! The actual minion spawner lives outside the encounter; this engine only
//! paces `SummonWaveEvent`s during the scripted phase and on emergency
//! triggers, and drops still-pending waves when the phase dies.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::boss::{Boss, EmergencySummonEvent};
use crate::core::{EncounterTuning, GameState};
use crate::encounter::{EncounterResetEvent, EncounterSet};
use crate::phases::{Phase, PhaseEndedEvent, PhaseStartedEvent};

/// One wave of minions for the external spawner.
#[derive(Debug)]
pub struct SummonWaveEvent {
    pub size: u32,
    pub origin: Vec2,
}

impl Message for SummonWaveEvent {}

#[derive(Resource, Debug, Default)]
pub struct SummonState {
    pub active: bool,
    pub waves_left: u32,
    pub stagger_timer: f32,
}

impl SummonState {
    pub fn arm(&mut self, wave_count: u32) {
        self.active = true;
        self.waves_left = wave_count;
        // First wave fires immediately, the rest on the stagger.
        self.stagger_timer = 0.0;
    }

    /// Advance the stagger clock; true when a wave is due.
    pub fn tick(&mut self, dt: f32, stagger: f32) -> bool {
        if !self.active || self.waves_left == 0 {
            return false;
        }
        self.stagger_timer -= dt;
        if self.stagger_timer > 0.0 {
            return false;
        }
        self.stagger_timer = stagger;
        self.waves_left -= 1;
        true
    }

    /// Drop any waves still pending. Idempotent.
    pub fn disarm(&mut self) {
        self.active = false;
        self.waves_left = 0;
    }
}

pub(crate) fn arm_summoning(
    mut started: MessageReader<PhaseStartedEvent>,
    tuning: Res<EncounterTuning>,
    mut state: ResMut<SummonState>,
) {
    for event in started.read() {
        if event.phase == Phase::Summoning {
            info!("Summoning phase armed: {} waves", tuning.summon.wave_count);
            state.arm(tuning.summon.wave_count);
        }
    }
}

pub(crate) fn tick_waves(
    time: Res<Time>,
    tuning: Res<EncounterTuning>,
    mut state: ResMut<SummonState>,
    mut waves: MessageWriter<SummonWaveEvent>,
    boss_query: Query<&Transform, With<Boss>>,
) {
    if !state.tick(time.delta_secs(), tuning.summon.wave_stagger) {
        return;
    }
    // Liveness check: a wave queued before the boss despawned is dropped.
    let Ok(boss_transform) = boss_query.single() else {
        warn!("Summon wave due but no boss is present; dropping it");
        return;
    };
    waves.write(SummonWaveEvent {
        size: tuning.summon.wave_size,
        origin: boss_transform.translation.truncate(),
    });
}

/// Low-health emergency: one immediate wave, independent of the phase.
pub(crate) fn handle_emergency_summon(
    mut emergencies: MessageReader<EmergencySummonEvent>,
    tuning: Res<EncounterTuning>,
    mut waves: MessageWriter<SummonWaveEvent>,
    boss_query: Query<&Transform, With<Boss>>,
) {
    for _ in emergencies.read() {
        let Ok(boss_transform) = boss_query.single() else {
            continue;
        };
        info!("Emergency summon wave");
        waves.write(SummonWaveEvent {
            size: tuning.summon.wave_size,
            origin: boss_transform.translation.truncate(),
        });
    }
}

pub(crate) fn cleanup_summoning(
    mut ended: MessageReader<PhaseEndedEvent>,
    mut resets: MessageReader<EncounterResetEvent>,
    mut state: ResMut<SummonState>,
) {
    let phase_over = ended.read().any(|e| e.phase == Phase::Summoning);
    let reset = resets.read().next().is_some();
    if phase_over || reset {
        state.disarm();
    }
}

pub struct SummoningPlugin;

impl Plugin for SummoningPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SummonState>()
            .add_message::<SummonWaveEvent>()
            .add_systems(
                Update,
                (
                    arm_summoning,
                    tick_waves,
                    handle_emergency_summon,
                    cleanup_summoning,
                )
                    .chain()
                    .in_set(EncounterSet::Summoning)
                    .run_if(in_state(GameState::Fight)),
            )
            .add_systems(OnExit(GameState::Fight), disarm_on_exit);
    }
}

fn disarm_on_exit(mut state: ResMut<SummonState>) {
    state.disarm();
}

#[cfg(test)]
mod tests {
    use super::SummonState;

    #[test]
    fn test_first_wave_fires_immediately() {
        let mut state = SummonState::default();
        state.arm(3);
        assert!(state.tick(0.0, 2.0));
        assert_eq!(state.waves_left, 2);
    }

    #[test]
    fn test_waves_respect_the_stagger() {
        let mut state = SummonState::default();
        state.arm(3);
        assert!(state.tick(0.0, 2.0));
        assert!(!state.tick(1.0, 2.0));
        assert!(state.tick(1.0, 2.0));
        assert!(state.tick(2.0, 2.0));
        // Pool exhausted.
        assert!(!state.tick(10.0, 2.0));
    }

    #[test]
    fn test_disarm_drops_pending_waves() {
        let mut state = SummonState::default();
        state.arm(3);
        assert!(state.tick(0.0, 2.0));
        state.disarm();
        assert!(!state.tick(10.0, 2.0));
        // Idempotent.
        state.disarm();
        assert_eq!(state.waves_left, 0);
    }
}
