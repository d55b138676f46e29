//! Launch cadence and ballistic launch solutions.

use crate::color::{random_palette_color, Color};
use crate::config::SimConfig;
use crate::firework::{Firework, Rocket};
use crate::random::RandomSource;
use crate::view::FrameBounds;
use glam::Vec3;
use std::time::Duration;

/// Initial velocity that carries a projectile from `start` to `target` in
/// exactly `flight_time` seconds under constant downward `gravity`.
///
/// `flight_time` must be positive; launch plans keep it in `[1.2, 1.8)`.
pub fn solve_launch_velocity(start: Vec3, target: Vec3, flight_time: f32, gravity: f32) -> Vec3 {
    let t = flight_time;
    let delta = target - start;
    Vec3::new(
        delta.x / t,
        (delta.y + 0.5 * gravity * t * t) / t,
        0.0,
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchPlan {
    pub start: Vec3,
    pub target: Vec3,
    pub flight_time: f32,
    pub color: Color,
}

impl LaunchPlan {
    pub fn velocity(&self, gravity: f32) -> Vec3 {
        solve_launch_velocity(self.start, self.target, self.flight_time, gravity)
    }
}

/// Result of one launcher tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LaunchDecision {
    pub launch_now: bool,
    /// Delay before a second, paired launch.
    pub paired_after: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct Launcher {
    accumulator: f32,
    threshold: f32,
    interval: (f32, f32),
    paired_chance: f32,
    paired_delay_ms: (f32, f32),
    flight_time: (f32, f32),
    apex_fraction: (f32, f32),
    width_fraction: f32,
    drift_max: f32,
    gravity: f32,
}

impl Launcher {
    pub fn new(config: &SimConfig, rng: &mut impl RandomSource) -> Self {
        let (lo, hi) = config.launch_interval;
        Self {
            accumulator: 0.0,
            threshold: rng.uniform(lo, hi),
            interval: config.launch_interval,
            paired_chance: config.paired_launch_chance,
            paired_delay_ms: config.paired_delay_ms,
            flight_time: config.flight_time,
            apex_fraction: config.apex_fraction,
            width_fraction: config.launch_width_fraction,
            drift_max: config.drift_max,
            gravity: config.gravity,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Accumulate `dt` and decide whether to launch this tick.
    pub fn tick(&mut self, dt: f32, rng: &mut impl RandomSource) -> LaunchDecision {
        self.accumulator += dt;
        if self.accumulator <= self.threshold {
            return LaunchDecision::default();
        }
        self.accumulator = 0.0;
        let (lo, hi) = self.interval;
        self.threshold = rng.uniform(lo, hi);

        let paired_after = rng.chance(self.paired_chance).then(|| {
            let (lo, hi) = self.paired_delay_ms;
            Duration::from_secs_f32(rng.uniform(lo, hi) / 1000.0)
        });
        LaunchDecision {
            launch_now: true,
            paired_after,
        }
    }

    /// Randomized launch geometry scaled to the visible frame.
    pub fn plan(&self, bounds: FrameBounds, rng: &mut impl RandomSource) -> LaunchPlan {
        let span = bounds.half_width * self.width_fraction;
        let start = Vec3::new(rng.uniform(-span, span), -bounds.half_height, 0.0);
        let (apex_lo, apex_hi) = self.apex_fraction;
        let apex = rng.uniform(apex_lo, apex_hi) * bounds.half_height;
        let drift = rng.uniform(-self.drift_max, self.drift_max);
        let (t_lo, t_hi) = self.flight_time;
        LaunchPlan {
            start,
            target: Vec3::new(start.x + drift, apex, 0.0),
            flight_time: rng.uniform(t_lo, t_hi),
            color: random_palette_color(rng),
        }
    }

    pub fn spawn(&self, bounds: FrameBounds, rng: &mut impl RandomSource) -> Firework {
        let plan = self.plan(bounds, rng);
        log::debug!(
            "[launch] x={:.1} apex={:.1} t={:.2}s",
            plan.start.x,
            plan.target.y,
            plan.flight_time
        );
        Firework::launch(Rocket::new(
            plan.start,
            plan.velocity(self.gravity),
            plan.color,
        ))
    }
}
