#![cfg(target_arch = "wasm32")]
//! Browser host: mounts the fireworks scheduler onto a `<canvas>` with a
//! WebGPU surface and drives it from `requestAnimationFrame`.

use fireworks_core::gpu::PointRenderer;
use fireworks_core::{FrameScheduler, SeededRandom, SetupError, SimConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod dom;
mod frame;
mod timers;

use frame::AnimationLoop;
use timers::BrowserTimers;

pub(crate) type WebScheduler = FrameScheduler<PointRenderer, BrowserTimers, SeededRandom>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fireworks-web loaded");
    Ok(())
}

/// A running fireworks display. Call `unmount` to stop it.
#[wasm_bindgen]
pub struct FireworksHandle {
    scheduler: Rc<RefCell<WebScheduler>>,
    canvas: web::HtmlCanvasElement,
    animation: Option<AnimationLoop>,
    resize_listener: Option<dom::ResizeListener>,
}

#[wasm_bindgen]
impl FireworksHandle {
    /// Re-read the canvas size and resize the surface and projection.
    pub fn resize(&self) {
        let viewport = dom::sync_canvas_backing_size(&self.canvas);
        match self.scheduler.try_borrow_mut() {
            Ok(mut s) => s.resize(viewport),
            Err(_) => log::warn!("[resize] scheduler busy; skipping"),
        }
    }

    /// Stop the frame loop, cancel deferred launches and free GPU buffers.
    /// Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.stop();
        }
        self.resize_listener = None;
        match self.scheduler.try_borrow_mut() {
            Ok(mut s) => s.teardown(),
            Err(_) => log::warn!("[teardown] scheduler busy; skipping"),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active_fireworks(&self) -> usize {
        self.scheduler
            .try_borrow()
            .map(|s| s.stats().active_fireworks)
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter)]
    pub fn packed_points(&self) -> usize {
        self.scheduler
            .try_borrow()
            .map(|s| s.stats().packed_points)
            .unwrap_or_default()
    }
}

impl Drop for FireworksHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mount the display on the canvas with id `canvas_id`.
///
/// Rejects with a readable message when the canvas is missing, not a canvas,
/// zero-sized, or WebGPU is unavailable; nothing is started in that case.
#[wasm_bindgen]
pub async fn mount(canvas_id: String) -> Result<FireworksHandle, JsValue> {
    match try_mount(&canvas_id).await {
        Ok(handle) => Ok(handle),
        Err(e) => {
            log::error!("[mount] {:#}", e);
            Err(js_sys::Error::new(&format!("{:#}", e)).into())
        }
    }
}

async fn try_mount(canvas_id: &str) -> anyhow::Result<FireworksHandle> {
    let canvas = dom::find_canvas(canvas_id)?;
    let viewport = dom::sync_canvas_backing_size(&canvas).validate()?;
    let config = SimConfig::default();

    let instance = wgpu::Instance::default();
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| SetupError::Backend(e.to_string()))?;
    let renderer = PointRenderer::new(&instance, surface, viewport, config.max_points).await?;

    let scheduler = FrameScheduler::mount_with_config(
        config,
        viewport,
        renderer,
        BrowserTimers::new(),
        SeededRandom::from_entropy(),
    )?;
    let scheduler = Rc::new(RefCell::new(scheduler));

    let resize_listener = {
        let scheduler = Rc::downgrade(&scheduler);
        let canvas = canvas.clone();
        dom::ResizeListener::attach(move || {
            let viewport = dom::sync_canvas_backing_size(&canvas);
            if let Some(s) = scheduler.upgrade() {
                if let Ok(mut s) = s.try_borrow_mut() {
                    s.resize(viewport);
                }
            }
        })
    };
    let animation = AnimationLoop::start(scheduler.clone());

    Ok(FireworksHandle {
        scheduler,
        canvas,
        animation: Some(animation),
        resize_listener,
    })
}
