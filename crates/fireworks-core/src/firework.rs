//! One firework from launch to the last fading spark.

use crate::color::Color;
use crate::explosion::ExplosionGenerator;
use crate::particle::Particle;
use crate::physics::PhysicsIntegrator;
use crate::random::RandomSource;
use crate::trail::Trail;
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct Rocket {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub trail: Trail,
}

impl Rocket {
    pub fn new(position: Vec3, velocity: Vec3, color: Color) -> Self {
        Self {
            position,
            velocity,
            color,
            trail: Trail::new(),
        }
    }
}

/// Lifecycle of a single effect instance.
///
/// `Ascending` is the only state that owns a rocket, so a detonated firework
/// can never carry one. `Dead` is terminal.
#[derive(Clone, Debug)]
pub enum Firework {
    Ascending(Rocket),
    Decaying(Vec<Particle>),
    Dead,
}

/// What happened during one [`Firework::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub detonated: bool,
}

impl Firework {
    pub fn launch(rocket: Rocket) -> Self {
        Firework::Ascending(rocket)
    }

    pub fn rocket(&self) -> Option<&Rocket> {
        match self {
            Firework::Ascending(r) => Some(r),
            _ => None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        match self {
            Firework::Decaying(ps) => ps,
            _ => &[],
        }
    }

    pub fn exploded(&self) -> bool {
        !matches!(self, Firework::Ascending(_))
    }

    /// No rocket and no particles left.
    pub fn is_finished(&self) -> bool {
        match self {
            Firework::Ascending(_) => false,
            Firework::Decaying(ps) => ps.is_empty(),
            Firework::Dead => true,
        }
    }

    /// Points this instance contributes to the render buffers.
    pub fn point_count(&self) -> usize {
        match self {
            Firework::Ascending(r) => 1 + r.trail.len(),
            Firework::Decaying(ps) => ps.len(),
            Firework::Dead => 0,
        }
    }

    /// Advance by `dt`: rocket first, then any particles (including ones a
    /// detonation produced during this same call).
    pub fn step(
        &mut self,
        physics: &PhysicsIntegrator,
        explosion: &ExplosionGenerator,
        dt: f32,
        rng: &mut impl RandomSource,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        let detonation = match self {
            Firework::Ascending(rocket) => physics
                .step_rocket(rocket, dt, rng)
                .then_some((rocket.position, rocket.color)),
            _ => None,
        };
        if let Some((origin, color)) = detonation {
            *self = Firework::Decaying(explosion.detonate(origin, color, rng));
            outcome.detonated = true;
        }

        let drained = match self {
            Firework::Decaying(particles) => {
                physics.step_particles(particles, dt);
                particles.is_empty()
            }
            _ => false,
        };
        if drained {
            *self = Firework::Dead;
        }

        outcome
    }
}
