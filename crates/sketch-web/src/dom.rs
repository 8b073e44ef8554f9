use sketch_core::{ContentBox, PixelRatioProvider, SizeSource, SketchError};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::WebSketch;

/// Where host callbacks find the controller once it exists.
pub type SketchSlot = Rc<RefCell<Weak<RefCell<WebSketch>>>>;

pub fn empty_slot() -> SketchSlot {
    Rc::new(RefCell::new(Weak::new()))
}

/// Run `f` against the controller if it is alive and not already borrowed.
pub fn with_sketch(slot: &SketchSlot, f: impl FnOnce(&mut WebSketch)) {
    let Some(sketch) = slot.borrow().upgrade() else {
        return;
    };
    let Ok(mut guard) = sketch.try_borrow_mut() else {
        log::warn!("[web] sketch busy; dropping event");
        return;
    };
    f(&mut guard);
}

pub fn query_param(window: &web::Window, name: &str) -> Option<String> {
    let search = window.location().search().ok()?;
    let params = web::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name)
}

/// Parse a computed CSS length like `"12.5px"`; anything else reads as 0.
pub fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Inner size of `el` without border and padding.
pub fn content_box(el: &web::HtmlElement) -> ContentBox {
    let mut width = el.client_width() as f64;
    let mut height = el.client_height() as f64;
    if let Some(Ok(Some(style))) = web::window().map(|w| w.get_computed_style(el)) {
        let px = |prop: &str| parse_px(&style.get_property_value(prop).unwrap_or_default());
        width -= px("padding-left") + px("padding-right");
        height -= px("padding-top") + px("padding-bottom");
    }
    ContentBox::new(width.max(0.0), height.max(0.0))
}

/// The page element the canvas is mounted into.
pub struct WebContainer {
    element: web::HtmlElement,
    slot: SketchSlot,
}

impl WebContainer {
    pub fn new(element: web::HtmlElement, slot: SketchSlot) -> Self {
        Self { element, slot }
    }

    pub fn find(document: &web::Document, id: &str, slot: SketchSlot) -> Option<Self> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
            .map(|el| Self::new(el, slot))
    }

    pub fn element(&self) -> &web::HtmlElement {
        &self.element
    }
}

impl SizeSource for WebContainer {
    fn content_box(&self) -> ContentBox {
        content_box(&self.element)
    }

    fn watch_resize(&self) -> sketch_core::Result<()> {
        let window = web::window().ok_or_else(|| SketchError::configuration("no window"))?;
        let slot = self.slot.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            with_sketch(&slot, |sketch| match sketch.resize() {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => log::warn!("[web] resize: {}", e),
                Err(e) => log::error!("[web] resize failed: {}", e),
            });
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .map_err(|e| SketchError::configuration(format!("resize listener: {:?}", e)))?;
        resize_closure.forget();
        Ok(())
    }
}

pub struct WindowPixelRatio;

impl PixelRatioProvider for WindowPixelRatio {
    fn device_pixel_ratio(&self) -> f64 {
        web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
    }
}
