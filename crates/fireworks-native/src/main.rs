use std::sync::Arc;
use std::time::Instant;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use fireworks_core::gpu::PointRenderer;
use fireworks_core::{FrameScheduler, ManualTimers, SeededRandom, SimConfig, Viewport};

type NativeScheduler = FrameScheduler<PointRenderer, ManualTimers, SeededRandom>;

fn mount(window: Arc<winit::window::Window>) -> anyhow::Result<NativeScheduler> {
    let size = window.inner_size();
    let viewport = Viewport::new(size.width, size.height).validate()?;
    let config = SimConfig::default();

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window)?;
    let renderer =
        pollster::block_on(PointRenderer::new(&instance, surface, viewport, config.max_points))?;

    Ok(FrameScheduler::mount_with_config(
        config,
        viewport,
        renderer,
        ManualTimers::new(),
        SeededRandom::from_entropy(),
    )?)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Fireworks (native)")
            .build(&event_loop)?,
    );

    let mut scheduler = mount(window.clone())?;
    let start = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => scheduler.resize(Viewport::new(size.width, size.height)),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            scheduler.teardown();
            elwt.exit();
        }
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => {
            if scheduler.frame(start.elapsed()).is_none() {
                elwt.exit();
            }
        }
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;
    Ok(())
}
