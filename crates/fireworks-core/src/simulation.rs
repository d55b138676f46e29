//! The active set of fireworks and everything that advances it.

use crate::buffers::{pack_fireworks, PackReport, RenderBuffers};
use crate::config::SimConfig;
use crate::explosion::ExplosionGenerator;
use crate::firework::Firework;
use crate::launcher::{LaunchDecision, Launcher};
use crate::physics::PhysicsIntegrator;
use crate::random::RandomSource;
use crate::view::{Camera, FrameBounds, Viewport};
use std::time::Duration;

/// What one [`Simulation::update`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    pub launched: bool,
    pub paired_after: Option<Duration>,
    pub detonations: usize,
    pub removed: usize,
}

pub struct Simulation<R: RandomSource> {
    config: SimConfig,
    fireworks: Vec<Firework>,
    launcher: Launcher,
    physics: PhysicsIntegrator,
    explosion: ExplosionGenerator,
    viewport: Viewport,
    camera: Camera,
    bounds: FrameBounds,
    rng: R,
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(config: SimConfig, viewport: Viewport, mut rng: R) -> Self {
        let camera = Camera::for_viewport(viewport);
        let bounds = camera.frame_bounds();
        Self {
            launcher: Launcher::new(&config, &mut rng),
            physics: PhysicsIntegrator::from_config(&config),
            explosion: ExplosionGenerator,
            fireworks: Vec::new(),
            config,
            viewport,
            camera,
            bounds,
            rng,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn bounds(&self) -> FrameBounds {
        self.bounds
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    /// Recompute projection bounds; fireworks in flight are left alone.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
        self.bounds = self.camera.frame_bounds();
    }

    pub fn insert(&mut self, firework: Firework) {
        self.fireworks.push(firework);
    }

    /// Launch one rocket immediately.
    pub fn spawn(&mut self) {
        let fw = self.launcher.spawn(self.bounds, &mut self.rng);
        self.fireworks.push(fw);
    }

    /// Advance everything by an already clamped `dt`.
    ///
    /// A paired launch is not performed here; its delay is returned so the
    /// caller can schedule it on a timer.
    pub fn update(&mut self, dt: f32) -> TickReport {
        let LaunchDecision {
            launch_now,
            paired_after,
        } = self.launcher.tick(dt, &mut self.rng);
        if launch_now {
            self.spawn();
        }

        let mut detonations = 0;
        for fw in &mut self.fireworks {
            if fw.step(&self.physics, &self.explosion, dt, &mut self.rng).detonated {
                detonations += 1;
            }
        }
        let before = self.fireworks.len();
        self.fireworks.retain(|fw| !fw.is_finished());

        TickReport {
            launched: launch_now,
            paired_after,
            detonations,
            removed: before - self.fireworks.len(),
        }
    }

    pub fn pack(&self, buffers: &mut RenderBuffers) -> PackReport {
        pack_fireworks(&self.fireworks, buffers)
    }

    pub fn clear(&mut self) {
        self.fireworks.clear();
    }

    pub fn live_points(&self) -> usize {
        self.fireworks.iter().map(Firework::point_count).sum()
    }
}
