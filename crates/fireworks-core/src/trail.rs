//! Decaying ember trail left behind an ascending rocket.

use crate::color::Color;
use crate::random::RandomSource;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub position: Vec3,
    pub life: f32,
    pub color: Color,
}

/// At 60 fps and a decay of 4/s a trail rarely holds more than ~15 points.
pub type Trail = SmallVec<[TrailPoint; 16]>;

#[derive(Clone, Copy, Debug)]
pub struct TrailSampler {
    pub spawn_chance: f32,
    pub decay_per_sec: f32,
}

impl TrailSampler {
    pub fn new(spawn_chance: f32, decay_per_sec: f32) -> Self {
        Self {
            spawn_chance,
            decay_per_sec,
        }
    }

    /// Age existing points, then maybe drop a fresh one at `head`.
    ///
    /// Newly added points start at full life and are not aged this tick.
    pub fn sample(
        &self,
        trail: &mut Trail,
        head: Vec3,
        color: Color,
        dt: f32,
        rng: &mut impl RandomSource,
    ) {
        let decay = dt * self.decay_per_sec;
        trail.retain(|p| {
            p.life -= decay;
            p.life > 0.0
        });
        if rng.chance(self.spawn_chance) {
            trail.push(TrailPoint {
                position: head,
                life: 1.0,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    #[test]
    fn points_expire_after_quarter_second() {
        let sampler = TrailSampler::new(1.0, 4.0);
        let mut rng = SeededRandom::new(1);
        let mut trail = Trail::new();
        sampler.sample(&mut trail, Vec3::ZERO, Color::WHITE, 0.0, &mut rng);
        assert_eq!(trail.len(), 1);

        let never = TrailSampler::new(0.0, 4.0);
        never.sample(&mut trail, Vec3::ZERO, Color::WHITE, 0.2, &mut rng);
        assert_eq!(trail.len(), 1);
        assert!((trail[0].life - 0.2).abs() < 1e-5);
        never.sample(&mut trail, Vec3::ZERO, Color::WHITE, 0.06, &mut rng);
        assert!(trail.is_empty());
    }

    #[test]
    fn spawn_rate_is_roughly_eighty_percent() {
        let sampler = TrailSampler::new(0.8, 0.0);
        let mut rng = SeededRandom::new(3);
        let mut trail = Trail::new();
        for _ in 0..1000 {
            sampler.sample(&mut trail, Vec3::ZERO, Color::WHITE, 0.0, &mut rng);
        }
        assert!((700..900).contains(&trail.len()), "got {}", trail.len());
    }
}
