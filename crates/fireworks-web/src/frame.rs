use crate::WebScheduler;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame loop driving a scheduler until stopped or torn down.
pub struct AnimationLoop {
    tick: Tick,
    request_id: Rc<Cell<Option<i32>>>,
}

fn request_frame(tick: &Tick, request_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    let tick = tick.borrow();
    let Some(cb) = tick.as_ref() else {
        return;
    };
    match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => request_id.set(Some(id)),
        Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
    }
}

impl AnimationLoop {
    pub fn start(scheduler: Rc<RefCell<WebScheduler>>) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(None));

        let tick_clone = tick.clone();
        let request_id_clone = request_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
            request_id_clone.set(None);
            let timestamp = Duration::from_secs_f64(timestamp_ms.max(0.0) / 1000.0);
            let running = match scheduler.try_borrow_mut() {
                Ok(mut s) => s.frame(timestamp).is_some(),
                // Host is mid-call into the scheduler; try again next frame.
                Err(_) => true,
            };
            if running {
                request_frame(&tick_clone, &request_id_clone);
            }
        }) as Box<dyn FnMut(f64)>));

        request_frame(&tick, &request_id);
        Self { tick, request_id }
    }

    /// Cancel the pending frame and drop the callback. Idempotent.
    pub fn stop(&self) {
        if let Some(id) = self.request_id.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        // Breaks the closure -> tick cycle.
        self.tick.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
