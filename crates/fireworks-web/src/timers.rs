//! `setTimeout`-backed deferred tasks.

use fireworks_core::TimerQueue;
use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Pending {
    fired: Rc<Cell<bool>>,
    // Keeps the JS callback alive until it fires or is cancelled.
    _closure: Closure<dyn FnMut()>,
}

/// A closure cannot be dropped while it is running, so fired entries are
/// swept on the next schedule/cancel instead of from inside the callback.
#[derive(Default)]
pub struct BrowserTimers {
    pending: FnvHashMap<i32, Pending>,
}

impl BrowserTimers {
    pub fn new() -> Self {
        Self::default()
    }

    fn sweep(&mut self) {
        self.pending.retain(|_, p| !p.fired.get());
    }
}

impl TimerQueue for BrowserTimers {
    fn schedule_once(&mut self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.sweep();
        let Some(window) = web::window() else {
            return;
        };
        let fired = Rc::new(Cell::new(false));
        let fired_cb = fired.clone();
        let task = RefCell::new(Some(task));
        let closure = Closure::wrap(Box::new(move || {
            fired_cb.set(true);
            if let Some(task) = task.borrow_mut().take() {
                task();
            }
        }) as Box<dyn FnMut()>);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay.as_millis().min(i32::MAX as u128) as i32,
        ) {
            Ok(handle) => {
                self.pending.insert(
                    handle,
                    Pending {
                        fired,
                        _closure: closure,
                    },
                );
            }
            Err(e) => log::warn!("[timers] setTimeout failed: {:?}", e),
        }
    }

    fn cancel_all(&mut self) {
        if let Some(window) = web::window() {
            for (handle, p) in &self.pending {
                if !p.fired.get() {
                    window.clear_timeout_with_handle(*handle);
                }
            }
        }
        self.pending.clear();
    }

    fn pending(&self) -> usize {
        self.pending.values().filter(|p| !p.fired.get()).count()
    }
}
