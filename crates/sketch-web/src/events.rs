use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{with_sketch, SketchSlot};

#[derive(Default)]
struct DragState {
    active: bool,
    pointer_id: i32,
    last_x: f64,
    last_y: f64,
}

/// Pointer drag orbits the camera, the wheel dollies it.
pub fn wire_orbit(canvas: &web::HtmlCanvasElement, slot: &SketchSlot) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    // pointerdown
    {
        let drag = drag.clone();
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if ev.button() != 0 {
                return;
            }
            let mut d = drag.borrow_mut();
            d.active = true;
            d.pointer_id = ev.pointer_id();
            d.last_x = ev.client_x() as f64;
            d.last_y = ev.client_y() as f64;
            _ = target.set_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove
    {
        let drag = drag.clone();
        let slot = slot.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let (dx, dy) = {
                let mut d = drag.borrow_mut();
                if !d.active || d.pointer_id != ev.pointer_id() {
                    return;
                }
                let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
                let delta = ((x - d.last_x) as f32, (y - d.last_y) as f32);
                d.last_x = x;
                d.last_y = y;
                delta
            };
            with_sketch(&slot, |sketch| sketch.orbit(dx, dy));
        }) as Box<dyn FnMut(_)>);
        _ = canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup / pointercancel
    {
        let drag = drag.clone();
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag.borrow_mut();
            if d.active && d.pointer_id == ev.pointer_id() {
                d.active = false;
                _ = target.release_pointer_capture(ev.pointer_id());
            }
        }) as Box<dyn FnMut(_)>);
        for name in ["pointerup", "pointercancel"] {
            _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // wheel
    {
        let slot = slot.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            let delta = ev.delta_y();
            if delta == 0.0 {
                return;
            }
            with_sketch(&slot, |sketch| sketch.zoom(delta.signum() as f32));
        }) as Box<dyn FnMut(_)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(false);
        _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &options,
        );
        closure.forget();
    }
}

/// Space toggles playback.
pub fn wire_keyboard(slot: &SketchSlot) {
    let Some(window) = web::window() else {
        return;
    };
    let slot = slot.clone();
    let keydown = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() || ev.code() != "Space" {
            return;
        }
        ev.prevent_default();
        with_sketch(&slot, |sketch| {
            if let Err(e) = sketch.toggle() {
                log::error!("[web] toggle failed: {}", e);
            }
        });
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    keydown.forget();
}
