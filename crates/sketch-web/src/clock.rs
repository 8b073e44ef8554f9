use sketch_core::DisplayClock;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{with_sketch, SketchSlot};

/// `requestAnimationFrame`-backed clock. Every fired callback is one
/// `on_frame` call on the controller in the slot.
pub struct FrameScheduler {
    tick: Closure<dyn FnMut()>,
}

impl FrameScheduler {
    pub fn new(slot: SketchSlot) -> Self {
        let tick = Closure::wrap(Box::new(move || {
            with_sketch(&slot, |sketch| {
                if let Err(e) = sketch.on_frame() {
                    log::error!("render error: {}", e);
                }
            });
        }) as Box<dyn FnMut()>);
        Self { tick }
    }
}

impl DisplayClock for FrameScheduler {
    fn request_frame(&self) {
        if let Some(w) = web::window() {
            if let Err(e) = w.request_animation_frame(self.tick.as_ref().unchecked_ref()) {
                log::error!("[web] requestAnimationFrame failed: {:?}", e);
            }
        }
    }
}
