//! Simulation tuning bundle.
//!
//! Hosts never see this; they only hand over a [`Viewport`](crate::Viewport).
//! Tests build custom configs to shrink capacity or force launch behavior.

use crate::constants::*;

/// Values the simulation reads each tick. `Default` mirrors [`crate::constants`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub gravity: f32,
    pub max_points: usize,
    pub max_dt: f32,

    pub launch_interval: (f32, f32),
    pub paired_launch_chance: f32,
    pub paired_delay_ms: (f32, f32),

    pub flight_time: (f32, f32),
    pub apex_fraction: (f32, f32),
    pub launch_width_fraction: f32,
    pub drift_max: f32,

    pub trail_spawn_chance: f32,
    pub trail_decay_per_sec: f32,
    pub detonation_velocity: f32,

    pub particle_gravity_scale: f32,
    pub particle_drag: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_points: MAX_POINTS,
            max_dt: MAX_DT,
            launch_interval: (LAUNCH_INTERVAL_MIN, LAUNCH_INTERVAL_MAX),
            paired_launch_chance: PAIRED_LAUNCH_CHANCE,
            paired_delay_ms: (PAIRED_DELAY_MIN_MS, PAIRED_DELAY_MAX_MS),
            flight_time: (FLIGHT_TIME_MIN, FLIGHT_TIME_MAX),
            apex_fraction: (APEX_MIN_FRACTION, APEX_MAX_FRACTION),
            launch_width_fraction: LAUNCH_WIDTH_FRACTION,
            drift_max: DRIFT_MAX,
            trail_spawn_chance: TRAIL_SPAWN_CHANCE,
            trail_decay_per_sec: TRAIL_DECAY_PER_SEC,
            detonation_velocity: DETONATION_VELOCITY,
            particle_gravity_scale: PARTICLE_GRAVITY_SCALE,
            particle_drag: PARTICLE_DRAG,
        }
    }
}

impl SimConfig {
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_paired_launch_chance(mut self, chance: f32) -> Self {
        self.paired_launch_chance = chance;
        self
    }
}
