// Host-side tests for the frame scheduler: dt clamping, deferred launches,
// resize propagation and teardown.

use fireworks_core::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

#[derive(Default, Debug)]
struct BackendLog {
    resizes: Vec<Viewport>,
    draws: usize,
    last_live: usize,
    releases: usize,
    // Returned by upcoming draws, in order, before drawing succeeds again.
    failures: VecDeque<RenderError>,
}

#[derive(Clone, Default)]
struct RecordingBackend {
    log: Rc<RefCell<BackendLog>>,
}

impl RenderBackend for RecordingBackend {
    fn resize(&mut self, viewport: Viewport) {
        self.log.borrow_mut().resizes.push(viewport);
    }

    fn draw(&mut self, buffers: &RenderBuffers, _camera: &Camera) -> Result<(), RenderError> {
        let mut log = self.log.borrow_mut();
        if let Some(err) = log.failures.pop_front() {
            return Err(err);
        }
        log.draws += 1;
        log.last_live = buffers.live_len();
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

/// Mimics an event-loop timer whose callbacks may still fire after cancellation.
#[derive(Clone, Default)]
struct StubbornTimers {
    tasks: Rc<RefCell<Vec<Box<dyn FnOnce()>>>>,
}

impl StubbornTimers {
    fn fire_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for task in tasks {
            task();
        }
    }
}

impl TimerQueue for StubbornTimers {
    fn schedule_once(&mut self, _delay: Duration, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push(task);
    }

    fn cancel_all(&mut self) {}

    fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

fn at(frame: u32) -> Duration {
    Duration::from_secs_f64(frame as f64 / 60.0)
}

fn eager_config() -> SimConfig {
    // Launch on the second frame and always pair.
    SimConfig {
        launch_interval: (0.01, 0.01),
        ..SimConfig::default().with_paired_launch_chance(1.0)
    }
}

#[test]
fn mount_rejects_zero_area_viewport() {
    let result = FrameScheduler::mount(
        Viewport::new(0, 480),
        RecordingBackend::default(),
        ManualTimers::new(),
        SeededRandom::new(1),
    );
    assert!(matches!(
        result.err(),
        Some(SetupError::InvalidViewport {
            width: 0,
            height: 480
        })
    ));
}

#[test]
fn mount_sizes_backend_and_allocates_buffers() {
    let backend = RecordingBackend::default();
    let log = backend.log.clone();
    let sched = FrameScheduler::mount(
        Viewport::new(800, 600),
        backend,
        ManualTimers::new(),
        SeededRandom::new(1),
    )
    .expect("mount");
    assert_eq!(log.borrow().resizes, vec![Viewport::new(800, 600)]);
    assert_eq!(sched.buffers().capacity(), constants::MAX_POINTS);
    assert!(sched.is_alive());
}

#[test]
fn first_frame_has_zero_dt_and_large_gaps_are_clamped() {
    let mut sched = FrameScheduler::mount(
        Viewport::new(800, 600),
        RecordingBackend::default(),
        ManualTimers::new(),
        SeededRandom::new(2),
    )
    .expect("mount");

    let first = sched.frame(Duration::from_secs(10)).expect("alive");
    assert_eq!(first.dt, 0.0);
    let normal = sched.frame(Duration::from_secs(10) + at(1)).expect("alive");
    assert!((normal.dt - 1.0 / 60.0).abs() < 1e-4);
    let after_background = sched.frame(Duration::from_secs(40)).expect("alive");
    assert_eq!(after_background.dt, constants::MAX_DT);
    // Time going backwards never yields a negative step.
    let backwards = sched.frame(Duration::from_secs(39)).expect("alive");
    assert_eq!(backwards.dt, 0.0);
}

#[test]
fn every_frame_updates_packs_then_draws() {
    let backend = RecordingBackend::default();
    let log = backend.log.clone();
    let mut sched = FrameScheduler::mount(
        Viewport::new(1024, 768),
        backend,
        ManualTimers::new(),
        SeededRandom::new(3),
    )
    .expect("mount");
    for i in 0..240 {
        let stats = sched.frame(at(i)).expect("alive");
        assert_eq!(log.borrow().last_live, stats.packed_points);
        assert_eq!(stats.packed_points, sched.simulation().live_points());
    }
    assert_eq!(log.borrow().draws, 240);
    assert_eq!(sched.stats().frame, 240);
    assert!(sched.stats().active_fireworks > 0);
}

#[test]
fn render_failures_skip_the_frame_and_lost_surface_is_reconfigured() {
    let backend = RecordingBackend::default();
    let log = backend.log.clone();
    log.borrow_mut().failures.extend([
        RenderError::SurfaceLost,
        RenderError::Other("validation".into()),
    ]);
    let mut sched = FrameScheduler::mount(
        Viewport::new(640, 480),
        backend,
        ManualTimers::new(),
        SeededRandom::new(11),
    )
    .expect("mount");

    sched.frame(at(0)).expect("alive");
    assert_eq!(
        log.borrow().resizes,
        vec![Viewport::new(640, 480), Viewport::new(640, 480)]
    );
    assert_eq!(log.borrow().draws, 0);

    sched.frame(at(1)).expect("alive");
    assert_eq!(log.borrow().resizes.len(), 2);
    assert_eq!(log.borrow().draws, 0);

    for i in 2..6 {
        sched.frame(at(i)).expect("alive");
    }
    assert_eq!(log.borrow().draws, 4);
    assert_eq!(sched.stats().frame, 6);
    assert!(sched.is_alive());
}

#[test]
fn paired_launch_fires_after_its_delay() {
    let config = SimConfig {
        launch_interval: (0.5, 0.5),
        ..SimConfig::default().with_paired_launch_chance(1.0)
    };
    let mut sched = FrameScheduler::mount_with_config(
        config,
        Viewport::new(1024, 768),
        RecordingBackend::default(),
        ManualTimers::new(),
        SeededRandom::new(4),
    )
    .expect("mount");

    let mut frame = 0;
    while sched.timers().pending() == 0 {
        sched.frame(at(frame));
        frame += 1;
        assert!(frame < 60, "no launch within a second");
    }
    assert_eq!(sched.stats().active_fireworks, 1);

    // Paired delay is under 300ms; 20 frames is ~333ms, well before the next
    // regular launch.
    for i in frame..frame + 20 {
        sched.frame(at(i));
    }
    assert_eq!(sched.timers().pending(), 0);
    let rockets = sched
        .simulation()
        .fireworks()
        .iter()
        .filter(|fw| fw.rocket().is_some())
        .count();
    assert_eq!(rockets, 2);
}

#[test]
fn resize_keeps_fireworks_and_reaches_backend() {
    let backend = RecordingBackend::default();
    let log = backend.log.clone();
    let mut sched = FrameScheduler::mount_with_config(
        eager_config(),
        Viewport::new(1024, 768),
        backend,
        ManualTimers::new(),
        SeededRandom::new(5),
    )
    .expect("mount");
    for i in 0..10 {
        sched.frame(at(i));
    }
    let before = sched.simulation().fireworks().len();
    assert!(before > 0);

    sched.resize(Viewport::new(400, 900));
    sched.resize(Viewport::new(0, 900));
    assert_eq!(sched.simulation().fireworks().len(), before);
    assert_eq!(sched.simulation().viewport(), Viewport::new(400, 900));
    assert_eq!(log.borrow().resizes.last(), Some(&Viewport::new(400, 900)));
    assert_eq!(log.borrow().resizes.len(), 2);
}

#[test]
fn teardown_is_idempotent_and_stops_frames() {
    let backend = RecordingBackend::default();
    let log = backend.log.clone();
    let mut sched = FrameScheduler::mount_with_config(
        eager_config(),
        Viewport::new(1024, 768),
        backend,
        ManualTimers::new(),
        SeededRandom::new(6),
    )
    .expect("mount");
    for i in 0..30 {
        sched.frame(at(i));
    }

    sched.teardown();
    assert!(!sched.is_alive());
    assert!(sched.buffers().is_released());
    assert!(sched.backend().is_none());
    assert_eq!(sched.timers().pending(), 0);
    assert!(sched.simulation().fireworks().is_empty());
    assert_eq!(log.borrow().releases, 1);

    sched.teardown();
    assert_eq!(log.borrow().releases, 1);
    assert!(sched.buffers().is_released());

    let draws = log.borrow().draws;
    assert!(sched.frame(at(31)).is_none());
    sched.resize(Viewport::new(640, 480));
    assert_eq!(log.borrow().draws, draws);
    drop(sched);
    assert_eq!(log.borrow().releases, 1);
}

#[test]
fn teardown_before_any_firework_completes() {
    let mut sched = FrameScheduler::mount(
        Viewport::new(1024, 768),
        RecordingBackend::default(),
        ManualTimers::new(),
        SeededRandom::new(7),
    )
    .expect("mount");
    sched.frame(at(0));
    sched.teardown();
    assert!(sched.frame(at(1)).is_none());
}

#[test]
fn deferred_launch_firing_after_teardown_is_a_no_op() {
    let timers = StubbornTimers::default();
    let handle = timers.clone();
    let mut sched = FrameScheduler::mount_with_config(
        eager_config(),
        Viewport::new(1024, 768),
        RecordingBackend::default(),
        timers,
        SeededRandom::new(8),
    )
    .expect("mount");
    sched.frame(at(0));
    sched.frame(at(1));
    assert_eq!(handle.pending(), 1);

    sched.teardown();
    handle.fire_all();
    assert!(sched.simulation().fireworks().is_empty());
}

#[test]
fn deferred_launch_outliving_the_scheduler_is_a_no_op() {
    let timers = StubbornTimers::default();
    let handle = timers.clone();
    let mut sched = FrameScheduler::mount_with_config(
        eager_config(),
        Viewport::new(1024, 768),
        RecordingBackend::default(),
        timers,
        SeededRandom::new(9),
    )
    .expect("mount");
    sched.frame(at(0));
    sched.frame(at(1));
    drop(sched);
    handle.fire_all();
}
