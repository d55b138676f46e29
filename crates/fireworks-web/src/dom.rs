use fireworks_core::{SetupError, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up the render target by element id.
pub fn find_canvas(canvas_id: &str) -> Result<web::HtmlCanvasElement, SetupError> {
    let document = window_document().ok_or_else(|| SetupError::MissingTarget("document".into()))?;
    document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| SetupError::MissingTarget(format!("#{canvas_id}")))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| SetupError::InvalidTarget(format!("#{canvas_id} is not a <canvas>")))
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
///
/// A collapsed (hidden) canvas keeps its old backing size and reports a
/// zero-area viewport, which mount rejects and resize ignores.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Viewport {
    let Some(w) = web::window() else {
        return Viewport::new(canvas.width(), canvas.height());
    };
    let rect = canvas.get_bounding_client_rect();
    let viewport = Viewport::from_css(rect.width(), rect.height(), w.device_pixel_ratio());
    if viewport.validate().is_ok() {
        canvas.set_width(viewport.width);
        canvas.set_height(viewport.height);
    }
    viewport
}

/// Window "resize" listener that detaches itself when dropped.
pub struct ResizeListener {
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn attach(handler: impl FnMut() + 'static) -> Option<Self> {
        let window = web::window()?;
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        if let Err(e) =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            log::warn!("[dom] could not listen for resize: {:?}", e);
            return None;
        }
        Some(Self { closure })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            let _ = w.remove_event_listener_with_callback(
                "resize",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
