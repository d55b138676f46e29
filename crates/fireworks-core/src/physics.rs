//! Semi-implicit Euler integration for rockets and burst particles.
//!
//! Velocity is updated before position. Particle drag is applied per tick,
//! not per second, so the fade-out reads the same at any display rate that
//! stays near 60 Hz.

use crate::config::SimConfig;
use crate::firework::Rocket;
use crate::particle::Particle;
use crate::random::RandomSource;
use crate::trail::TrailSampler;

#[derive(Clone, Copy, Debug)]
pub struct PhysicsIntegrator {
    pub gravity: f32,
    pub particle_gravity_scale: f32,
    pub particle_drag: f32,
    pub detonation_velocity: f32,
    pub trail: TrailSampler,
}

impl PhysicsIntegrator {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            gravity: config.gravity,
            particle_gravity_scale: config.particle_gravity_scale,
            particle_drag: config.particle_drag,
            detonation_velocity: config.detonation_velocity,
            trail: TrailSampler::new(config.trail_spawn_chance, config.trail_decay_per_sec),
        }
    }

    /// Advance one rocket. Returns `true` once it has slowed enough to detonate.
    pub fn step_rocket(&self, rocket: &mut Rocket, dt: f32, rng: &mut impl RandomSource) -> bool {
        rocket.velocity.y -= self.gravity * dt;
        rocket.position += rocket.velocity * dt;
        self.trail
            .sample(&mut rocket.trail, rocket.position, rocket.color, dt, rng);
        rocket.velocity.y < self.detonation_velocity
    }

    /// Advance and age particles, dropping the expired ones.
    pub fn step_particles(&self, particles: &mut Vec<Particle>, dt: f32) {
        let fall = self.gravity * self.particle_gravity_scale * dt;
        particles.retain_mut(|p| {
            p.velocity.y -= fall;
            p.velocity *= self.particle_drag;
            p.position += p.velocity * dt;
            p.life -= dt / p.max_life;
            p.is_alive()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::random::SeededRandom;
    use glam::Vec3;

    fn integrator() -> PhysicsIntegrator {
        PhysicsIntegrator::from_config(&SimConfig::default())
    }

    #[test]
    fn rocket_decelerates_under_gravity() {
        let mut rocket = Rocket::new(Vec3::ZERO, Vec3::new(0.0, 50.0, 0.0), Color::WHITE);
        let mut rng = SeededRandom::new(5);
        let detonate = integrator().step_rocket(&mut rocket, 0.1, &mut rng);
        assert!(!detonate);
        assert!((rocket.velocity.y - 46.0).abs() < 1e-4);
        assert!((rocket.position.y - 4.6).abs() < 1e-4);
    }

    #[test]
    fn slow_rocket_requests_detonation() {
        let mut rocket = Rocket::new(Vec3::ZERO, Vec3::new(0.0, 8.5, 0.0), Color::WHITE);
        let mut rng = SeededRandom::new(5);
        assert!(integrator().step_rocket(&mut rocket, 1.0 / 60.0, &mut rng));
    }

    #[test]
    fn particles_fall_at_quarter_gravity_with_drag() {
        let mut ps = vec![Particle::new(Vec3::ZERO, Vec3::ZERO, Color::WHITE, 2.0, 4.0)];
        integrator().step_particles(&mut ps, 0.1);
        let p = ps[0];
        assert!((p.velocity.y - (-1.0 * 0.97)).abs() < 1e-5);
        assert!((p.life - 0.95).abs() < 1e-5);
    }

    #[test]
    fn expired_particles_are_removed_in_the_same_tick() {
        let mut ps = vec![
            Particle::new(Vec3::ZERO, Vec3::ZERO, Color::WHITE, 0.05, 4.0),
            Particle::new(Vec3::ZERO, Vec3::ZERO, Color::WHITE, 5.0, 4.0),
        ];
        integrator().step_particles(&mut ps, 0.1);
        assert_eq!(ps.len(), 1);
        assert_eq!(ps[0].max_life, 5.0);
    }
}
