//! Frame driver: deferred launches, update, pack, hand-off to the renderer,
//! and teardown.
//!
//! The scheduler never owns the timing source. Hosts call [`FrameScheduler::frame`]
//! from their per-frame callback (`requestAnimationFrame`, a winit redraw) and
//! stop calling it after [`FrameScheduler::teardown`]. Deferred paired launches
//! go through a [`TimerQueue`] so they can fire between frames.

use crate::buffers::RenderBuffers;
use crate::config::SimConfig;
use crate::error::{RenderError, SetupError};
use crate::random::RandomSource;
use crate::simulation::Simulation;
use crate::view::{Camera, Viewport};
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Shared "subsystem alive" flag checked by every deferred task.
#[derive(Clone, Debug)]
pub struct AliveFlag(Rc<Cell<bool>>);

impl AliveFlag {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn kill(&self) {
        self.0.set(false);
    }
}

impl Default for AliveFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot delayed callbacks.
pub trait TimerQueue {
    fn schedule_once(&mut self, delay: Duration, task: Box<dyn FnOnce()>);

    /// Cooperative queues run due tasks here; event-loop backed ones ignore it.
    fn advance(&mut self, _elapsed: Duration) {}

    /// Drop every task that has not fired yet.
    fn cancel_all(&mut self);

    fn pending(&self) -> usize;
}

/// Timer queue driven by explicit `advance` calls.
#[derive(Default)]
pub struct ManualTimers {
    now: Duration,
    queue: Vec<(Duration, Box<dyn FnOnce()>)>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimerQueue for ManualTimers {
    fn schedule_once(&mut self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.queue.push((self.now + delay, task));
    }

    fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
        let now = self.now;
        if !self.queue.iter().any(|(at, _)| *at <= now) {
            return;
        }
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.queue)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.queue = waiting;
        for (_, task) in due {
            task();
        }
    }

    fn cancel_all(&mut self) {
        self.queue.clear();
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Consumer of the packed buffers, e.g. a GPU point renderer.
pub trait RenderBackend {
    fn resize(&mut self, viewport: Viewport);
    fn draw(&mut self, buffers: &RenderBuffers, camera: &Camera) -> Result<(), RenderError>;
    /// Free GPU-side resources. Called at most once.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub dt: f32,
    pub active_fireworks: usize,
    pub packed_points: usize,
    pub requested_points: usize,
    pub truncated: bool,
}

pub struct FrameScheduler<B: RenderBackend, T: TimerQueue, R: RandomSource + 'static> {
    sim: Rc<RefCell<Simulation<R>>>,
    buffers: RenderBuffers,
    backend: Option<B>,
    timers: T,
    alive: AliveFlag,
    max_dt: f32,
    last_timestamp: Option<Duration>,
    stats: FrameStats,
}

impl<B: RenderBackend, T: TimerQueue, R: RandomSource + 'static> FrameScheduler<B, T, R> {
    pub fn mount(viewport: Viewport, backend: B, timers: T, rng: R) -> Result<Self, SetupError> {
        Self::mount_with_config(SimConfig::default(), viewport, backend, timers, rng)
    }

    pub fn mount_with_config(
        config: SimConfig,
        viewport: Viewport,
        mut backend: B,
        timers: T,
        rng: R,
    ) -> Result<Self, SetupError> {
        let viewport = viewport.validate()?;
        backend.resize(viewport);
        let buffers = RenderBuffers::new(config.max_points);
        log::info!(
            "[mount] viewport={}x{} capacity={}",
            viewport.width,
            viewport.height,
            config.max_points
        );
        Ok(Self {
            max_dt: config.max_dt,
            sim: Rc::new(RefCell::new(Simulation::new(config, viewport, rng))),
            buffers,
            backend: Some(backend),
            timers,
            alive: AliveFlag::new(),
            last_timestamp: None,
            stats: FrameStats::default(),
        })
    }

    pub fn is_alive(&self) -> bool {
        self.alive.is_alive()
    }

    pub fn alive_flag(&self) -> AliveFlag {
        self.alive.clone()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn simulation(&self) -> Ref<'_, Simulation<R>> {
        self.sim.borrow()
    }

    pub fn buffers(&self) -> &RenderBuffers {
        &self.buffers
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Per-frame entry point. `timestamp` is the host's monotonic frame time.
    ///
    /// Returns `None` once torn down.
    pub fn frame(&mut self, timestamp: Duration) -> Option<FrameStats> {
        if !self.is_alive() {
            return None;
        }
        let elapsed = self
            .last_timestamp
            .map(|last| timestamp.saturating_sub(last))
            .unwrap_or_default();
        self.last_timestamp = Some(timestamp);

        self.timers.advance(elapsed);
        // A deferred task cannot tear us down, but stay strict about ordering.
        if !self.is_alive() {
            return None;
        }
        Some(self.step(elapsed.as_secs_f32()))
    }

    /// Update, pack and draw with `dt` seconds, clamped to `[0, max_dt]`.
    pub fn step(&mut self, dt: f32) -> FrameStats {
        if !self.is_alive() {
            return self.stats;
        }
        let dt = dt.clamp(0.0, self.max_dt);

        let (tick, report, active) = {
            let mut sim = self.sim.borrow_mut();
            let tick = sim.update(dt);
            let report = sim.pack(&mut self.buffers);
            (tick, report, sim.fireworks().len())
        };

        if let Some(delay) = tick.paired_after {
            self.schedule_paired_launch(delay);
        }

        if report.truncated() && !self.stats.truncated {
            log::warn!(
                "[pack] {} live points exceed capacity {}; dropping the excess",
                report.requested,
                self.buffers.capacity()
            );
        } else if !report.truncated() && self.stats.truncated {
            log::info!("[pack] back under capacity ({} points)", report.written);
        }

        self.draw();

        self.stats = FrameStats {
            frame: self.stats.frame + 1,
            dt,
            active_fireworks: active,
            packed_points: report.written,
            requested_points: report.requested,
            truncated: report.truncated(),
        };
        self.stats
    }

    fn draw(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        let sim = self.sim.borrow();
        match backend.draw(&self.buffers, sim.camera()) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                log::warn!("[render] surface lost; reconfiguring");
                backend.resize(sim.viewport());
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    fn schedule_paired_launch(&mut self, delay: Duration) {
        let sim = Rc::downgrade(&self.sim);
        let alive = self.alive.clone();
        self.timers.schedule_once(
            delay,
            Box::new(move || {
                if !alive.is_alive() {
                    return;
                }
                let Some(sim) = sim.upgrade() else {
                    return;
                };
                match sim.try_borrow_mut() {
                    Ok(mut sim) => sim.spawn(),
                    Err(_) => log::warn!("[launch] simulation busy; skipping paired launch"),
                };
            }),
        );
    }

    /// Recompute projection bounds and resize the backend. Zero-area sizes are ignored.
    pub fn resize(&mut self, viewport: Viewport) {
        if !self.is_alive() {
            return;
        }
        let Ok(viewport) = viewport.validate() else {
            log::debug!("[resize] ignoring {}x{}", viewport.width, viewport.height);
            return;
        };
        self.sim.borrow_mut().resize(viewport);
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(viewport);
        }
        log::info!("[resize] {}x{}", viewport.width, viewport.height);
    }

    /// Stop everything and free resources. Safe to call more than once.
    pub fn teardown(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.alive.kill();
        let cancelled = self.timers.pending();
        self.timers.cancel_all();
        self.sim.borrow_mut().clear();
        self.buffers.release();
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
        self.last_timestamp = None;
        log::info!("[teardown] released buffers, cancelled {} pending launches", cancelled);
    }
}

impl<B: RenderBackend, T: TimerQueue, R: RandomSource + 'static> Drop for FrameScheduler<B, T, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_timers_run_only_due_tasks() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut timers = ManualTimers::new();
        timers.advance(Duration::from_millis(50));
        assert_eq!(timers.pending(), 0);

        for ms in [100u64, 250] {
            let fired = fired.clone();
            timers.schedule_once(
                Duration::from_millis(ms),
                Box::new(move || fired.borrow_mut().push(ms)),
            );
        }
        timers.advance(Duration::from_millis(60));
        assert!(fired.borrow().is_empty());
        assert_eq!(timers.pending(), 2);

        timers.advance(Duration::from_millis(40));
        assert_eq!(*fired.borrow(), vec![100]);
        assert_eq!(timers.pending(), 1);

        timers.cancel_all();
        timers.advance(Duration::from_secs(1));
        assert_eq!(*fired.borrow(), vec![100]);
    }
}
