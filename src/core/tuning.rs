//! Core domain: encounter tuning values.
//!
//! Every duration, radius, and probability the encounter uses lives here so
//! the feel of the fight can be adjusted from `assets/encounter.ron` without
//! touching code. All weights are empirically tuned values, not derived.

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub max_health: f32,
    pub radius: f32,
    /// Hunting speed before aggression scaling.
    pub base_speed: f32,
    /// Damage on direct body contact with the player.
    pub contact_damage: f32,
    /// Delay between the killing blow and the victory screen.
    pub victory_delay: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            max_health: 2000.0,
            radius: 28.0,
            base_speed: 140.0,
            contact_damage: 20.0,
            victory_delay: 2.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub lives: u32,
    pub radius: f32,
    pub move_speed: f32,
    /// Invulnerability window after taking a hit.
    pub iframes: f32,
    /// Duration of the shield pickup's protection.
    pub shield_duration: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            lives: 3,
            radius: 12.0,
            move_speed: 320.0,
            iframes: 1.0,
            shield_duration: 4.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DamageTuning {
    /// Regular damage is scaled down by this factor to lengthen the fight.
    pub regular_scale: f32,
    /// Health fractions that emit threshold notifications when crossed.
    pub thresholds: Vec<f32>,
    /// Below this health fraction a threshold crossing may trigger an
    /// emergency summon wave.
    pub emergency_summon_below: f32,
    pub emergency_summon_chance: f64,
}

impl Default for DamageTuning {
    fn default() -> Self {
        Self {
            regular_scale: 0.4,
            thresholds: vec![0.6, 0.3, 0.15],
            emergency_summon_below: 0.15,
            emergency_summon_chance: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhaseTuning {
    pub intro_duration: f32,
    pub summoning_duration: f32,
    pub minefield_duration: f32,
    pub bullets_duration: f32,
    /// Forced-vulnerable window after every scripted phase.
    pub vulnerability_window: f32,
    /// Duration multiplier for duel-loss filler phases.
    pub filler_scale: f32,
    /// Per-kind cap on filler re-runs.
    pub filler_max_uses: u8,
    /// Health fractions that trigger each scripted phase while hunting.
    pub summoning_at: f32,
    pub minefield_at: f32,
    pub bullets_at: f32,
    pub pathtrace_at: f32,
}

impl Default for PhaseTuning {
    fn default() -> Self {
        Self {
            intro_duration: 2.5,
            summoning_duration: 12.0,
            minefield_duration: 25.0,
            bullets_duration: 90.0,
            vulnerability_window: 3.0,
            filler_scale: 0.5,
            filler_max_uses: 3,
            summoning_at: 0.85,
            minefield_at: 0.60,
            bullets_at: 0.40,
            pathtrace_at: 0.25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MinefieldTuning {
    /// Interval of the hunt-teleport cycle.
    pub hunt_interval: f32,
    /// How far from the player the boss re-appears when teleporting.
    pub hunt_offset: f32,
    /// Interval of the static-field drop cycle.
    pub field_interval: f32,
    pub field_min: u32,
    pub field_max: u32,
    /// Chance per field tick to also seed one mine in each corner.
    pub corner_chance: f64,
    /// Minimum pairwise distance between mines.
    pub min_separation: f32,
    /// Relocation attempts before giving up on a placement.
    pub placement_attempts: u32,
    pub timed_fuse: f32,
    pub timed_danger_radius: f32,
    pub static_danger_radius: f32,
    pub chain_radius: f32,
    /// Extra delay per additional mine in a chain reaction.
    pub chain_stagger: f32,
    pub blink_period: f32,
    pub contact_damage: f32,
    pub max_mines: usize,
}

impl Default for MinefieldTuning {
    fn default() -> Self {
        Self {
            hunt_interval: 4.0,
            hunt_offset: 120.0,
            field_interval: 3.0,
            field_min: 2,
            field_max: 4,
            corner_chance: 0.25,
            min_separation: 70.0,
            placement_attempts: 10,
            timed_fuse: 5.0,
            timed_danger_radius: 60.0,
            static_danger_radius: 40.0,
            chain_radius: 110.0,
            chain_stagger: 0.12,
            blink_period: 0.25,
            contact_damage: 12.0,
            max_mines: 48,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BulletsTuning {
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_damage: f32,
    pub max_projectiles: usize,
    /// How many patterns from the rotation a single run uses.
    pub rotation_len: usize,
    pub spiral_interval: f32,
    /// Angular step between consecutive spiral shots, degrees.
    pub spiral_step_deg: f32,
    pub wall_interval: f32,
    pub wall_spacing: f32,
    /// Half-width added around the player to keep the wall gap dodgeable.
    pub wall_gap_margin: f32,
    pub cross_interval: f32,
    pub diagonal_chance: f64,
    pub rain_interval: f32,
    pub rain_count: u32,
    pub rain_jitter_deg: f32,
    pub burst_charge: f32,
    pub burst_count: u32,
    pub burst_interval: f32,
    pub burst_speed: f32,
    pub burst_lifetime: f32,
    pub shield_interval: f32,
}

impl Default for BulletsTuning {
    fn default() -> Self {
        Self {
            projectile_speed: 220.0,
            projectile_lifetime: 6.0,
            projectile_damage: 8.0,
            max_projectiles: 256,
            rotation_len: 2,
            spiral_interval: 0.08,
            spiral_step_deg: 23.0,
            wall_interval: 2.2,
            wall_spacing: 48.0,
            wall_gap_margin: 36.0,
            cross_interval: 0.5,
            diagonal_chance: 0.15,
            rain_interval: 0.35,
            rain_count: 3,
            rain_jitter_deg: 14.0,
            burst_charge: 1.6,
            burst_count: 18,
            burst_interval: 0.05,
            burst_speed: 520.0,
            burst_lifetime: 9.0,
            shield_interval: 12.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathTraceTuning {
    pub rounds: u32,
    /// Static display time before the boss runs the path.
    pub preview_duration: f32,
    pub base_speed: f32,
    /// Speed added every `rounds_per_step` rounds.
    pub speed_step: f32,
    pub rounds_per_step: u32,
    /// Collision radius along the traced trail.
    pub trail_radius: f32,
    pub trail_damage: f32,
    /// Interval between full grid regenerations.
    pub grid_interval: f32,
    pub grid_cell: f32,
    pub sweep_speed: f32,
    pub line_damage: f32,
    pub player_slow_factor: f32,
}

impl Default for PathTraceTuning {
    fn default() -> Self {
        Self {
            rounds: 10,
            preview_duration: 3.0,
            base_speed: 260.0,
            speed_step: 40.0,
            rounds_per_step: 3,
            trail_radius: 26.0,
            trail_damage: 15.0,
            grid_interval: 6.0,
            grid_cell: 120.0,
            sweep_speed: 140.0,
            line_damage: 6.0,
            player_slow_factor: 0.35,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DuelTuning {
    /// Wins required to defeat the boss; also the best-of count.
    pub max_defeats: u32,
    pub countdown: f32,
    pub selection_window: f32,
    pub result_delay: f32,
    /// Chance a tie resolves in the player's favor.
    pub tie_win_chance: f64,
    /// Chance a raw player win is kept (otherwise flipped to a loss).
    pub keep_win_chance: f64,
    /// Chance a raw player loss is flipped to a win.
    pub flip_loss_chance: f64,
    /// Chance a timed-out selection resolves as a player win.
    pub timeout_win_bias: f64,
    /// Fraction of max health removed per duel win.
    pub win_damage_fraction: f32,
}

impl Default for DuelTuning {
    fn default() -> Self {
        Self {
            max_defeats: 3,
            countdown: 3.0,
            selection_window: 4.0,
            result_delay: 2.0,
            tie_win_chance: 0.7,
            keep_win_chance: 0.85,
            flip_loss_chance: 0.4,
            timeout_win_bias: 0.6,
            win_damage_fraction: 0.01,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummonTuning {
    pub wave_count: u32,
    pub wave_stagger: f32,
    pub wave_size: u32,
}

impl Default for SummonTuning {
    fn default() -> Self {
        Self {
            wave_count: 3,
            wave_stagger: 2.0,
            wave_size: 4,
        }
    }
}

/// All encounter tuning, optionally overridden from `assets/encounter.ron`.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EncounterTuning {
    pub boss: BossTuning,
    pub player: PlayerTuning,
    pub damage: DamageTuning,
    pub phases: PhaseTuning,
    pub minefield: MinefieldTuning,
    pub bullets: BulletsTuning,
    pub pathtrace: PathTraceTuning,
    pub duel: DuelTuning,
    pub summon: SummonTuning,
}
