use sketch_core::{ParamRange, PROGRESS_RANGE};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{with_sketch, SketchSlot};

const PANEL_STYLE: &str = "position:fixed;top:8px;right:8px;padding:6px 10px;\
background:rgba(0,0,0,0.6);color:#fff;font:12px monospace;border-radius:4px;z-index:10";

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

fn range_input(
    document: &web::Document,
    range: ParamRange,
    value: f32,
) -> anyhow::Result<web::HtmlInputElement> {
    let input = document
        .create_element("input")
        .map_err(js_err)?
        .dyn_into::<web::HtmlInputElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    input.set_type("range");
    input.set_min(&range.min.to_string());
    input.set_max(&range.max.to_string());
    input.set_step(&range.step.to_string());
    _ = input.set_value_as_number(value as f64);
    Ok(input)
}

/// Floating panel with a `progress` slider bound to the sketch settings.
pub fn mount_progress_panel(
    document: &web::Document,
    slot: &SketchSlot,
    initial: f32,
) -> anyhow::Result<()> {
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    let panel = document.create_element("div").map_err(js_err)?;
    panel.set_attribute("style", PANEL_STYLE).map_err(js_err)?;

    let label = document.create_element("span").map_err(js_err)?;
    label.set_text_content(Some("progress "));
    let readout = document.create_element("span").map_err(js_err)?;
    readout.set_text_content(Some(&format!("{:.2}", initial)));
    let input = range_input(document, PROGRESS_RANGE, initial)?;

    {
        let slot = slot.clone();
        let target = input.clone();
        let readout = readout.clone();
        let on_input = Closure::wrap(Box::new(move || {
            let raw = target.value_as_number() as f32;
            with_sketch(&slot, |sketch| {
                let snapped = sketch.set_progress(raw);
                readout.set_text_content(Some(&format!("{:.2}", snapped)));
            });
        }) as Box<dyn FnMut()>);
        input
            .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
            .map_err(js_err)?;
        on_input.forget();
    }

    panel.append_child(&label).map_err(js_err)?;
    panel.append_child(&input).map_err(js_err)?;
    panel.append_child(&readout).map_err(js_err)?;
    body.append_child(&panel).map_err(js_err)?;
    log::info!("[web] debug panel mounted");
    Ok(())
}
