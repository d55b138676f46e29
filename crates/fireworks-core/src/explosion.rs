//! Detonation: one rocket becomes a radial burst plus a handful of white sparks.

use crate::color::Color;
use crate::constants::*;
use crate::particle::Particle;
use crate::random::RandomSource;
use glam::Vec3;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, Default)]
pub struct ExplosionGenerator;

impl ExplosionGenerator {
    /// Particles for a burst centered on `origin`, colored around `base`.
    ///
    /// Burst directions are evenly spaced around the circle before jitter, so
    /// the ring stays readable even with few particles.
    pub fn detonate(
        &self,
        origin: Vec3,
        base: Color,
        rng: &mut impl RandomSource,
    ) -> Vec<Particle> {
        let count = rng.int_range(BURST_COUNT_MIN, BURST_COUNT_MAX);
        let mut particles = Vec::with_capacity(count + SPARK_COUNT);

        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU
                + rng.uniform(-BURST_ANGLE_JITTER, BURST_ANGLE_JITTER);
            let speed = rng.uniform(BURST_SPEED_MIN, BURST_SPEED_MAX);
            let color = base.offset_hsl(
                rng.uniform(-BURST_HUE_JITTER, BURST_HUE_JITTER),
                rng.uniform(-BURST_SATURATION_JITTER, BURST_SATURATION_JITTER),
                rng.uniform(-BURST_LIGHTNESS_JITTER, BURST_LIGHTNESS_JITTER),
            );
            particles.push(Particle::new(
                origin,
                radial(angle, speed),
                color,
                rng.uniform(BURST_LIFE_MIN, BURST_LIFE_MAX),
                rng.uniform(BURST_SIZE_MIN, BURST_SIZE_MAX),
            ));
        }

        for _ in 0..SPARK_COUNT {
            let angle = rng.unit_circle_angle();
            let speed = rng.uniform(SPARK_SPEED_MIN, SPARK_SPEED_MAX);
            particles.push(Particle::new(
                origin,
                radial(angle, speed),
                Color::WHITE,
                rng.uniform(SPARK_LIFE_MIN, SPARK_LIFE_MAX),
                rng.uniform(SPARK_SIZE_MIN, SPARK_SIZE_MAX),
            ));
        }

        log::debug!(
            "[burst] {} particles + {} sparks at ({:.1},{:.1})",
            count,
            SPARK_COUNT,
            origin.x,
            origin.y
        );
        particles
    }
}

#[inline]
fn radial(angle: f32, speed: f32) -> Vec3 {
    Vec3::new(angle.cos() * speed, angle.sin() * speed, 0.0)
}
