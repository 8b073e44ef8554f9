#![cfg(target_arch = "wasm32")]
use sketch_core::{PlaybackMode, SketchConfig, SketchController, SketchError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub mod clock;
pub mod dom;
pub mod events;
pub mod panel;
pub mod renderer;

pub use clock::FrameScheduler;
pub use dom::{content_box, parse_px, WebContainer, WindowPixelRatio};
pub use renderer::WebRenderer;

pub type WebSketch = SketchController<WebContainer, WebRenderer>;

// Page element the canvas is mounted into
pub const CONTAINER_ID: &str = "app";
// `?debug` shows the parameter panel, `?playback=literal` selects the playback mode
const DEBUG_PARAM: &str = "debug";
const PLAYBACK_PARAM: &str = "playback";

thread_local! {
    static SKETCH: RefCell<Option<Rc<RefCell<WebSketch>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sketch-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn sketch_err(e: SketchError) -> anyhow::Error {
    anyhow::anyhow!("{}", e)
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let playback = match dom::query_param(&window, PLAYBACK_PARAM) {
        Some(raw) => raw.parse::<PlaybackMode>().map_err(sketch_err)?,
        None => PlaybackMode::default(),
    };

    let slot = dom::empty_slot();
    let container = WebContainer::find(&document, CONTAINER_ID, slot.clone());
    if container.is_none() {
        // fail before touching the GPU
        return Err(sketch_err(SketchError::configuration(format!(
            "missing #{} container",
            CONTAINER_ID
        ))));
    }
    let config = SketchConfig::new(container).with_playback(playback);

    let renderer = WebRenderer::new(&document, config.output_encoding).await?;
    let canvas = renderer.canvas().clone();
    let sketch = SketchController::new(
        config,
        renderer,
        Box::new(FrameScheduler::new(slot.clone())),
        Box::new(WindowPixelRatio),
    )
    .map_err(sketch_err)?;
    let sketch = Rc::new(RefCell::new(sketch));
    *slot.borrow_mut() = Rc::downgrade(&sketch);

    events::wire_orbit(&canvas, &slot);
    events::wire_keyboard(&slot);
    if dom::query_param(&window, DEBUG_PARAM).is_some() {
        let initial = sketch.borrow().settings().progress();
        panel::mount_progress_panel(&document, &slot, initial)?;
    }

    SKETCH.with(|cell| *cell.borrow_mut() = Some(sketch));
    log::info!("[web] sketch ready ({:?} playback)", playback);
    Ok(())
}

fn with_global(f: impl FnOnce(&mut WebSketch)) {
    SKETCH.with(|cell| {
        let Some(sketch) = cell.borrow().clone() else {
            log::warn!("[web] sketch not started yet");
            return;
        };
        match sketch.try_borrow_mut() {
            Ok(mut guard) => f(&mut guard),
            Err(_) => log::warn!("[web] sketch busy"),
        }
    });
}

/// Resume the animation loop.
#[wasm_bindgen]
pub fn play() {
    with_global(|sketch| {
        if let Err(e) = sketch.play() {
            log::error!("[web] play failed: {}", e);
        }
    });
}

/// Halt the animation loop.
#[wasm_bindgen]
pub fn stop() {
    with_global(|sketch| sketch.stop());
}
