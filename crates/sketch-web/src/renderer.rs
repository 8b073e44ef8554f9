use sketch_core::{
    ColorEncoding, MeshHandle, PerspectiveCamera, PlaneObject, RenderSurface, Renderer, Scene,
    SketchError,
};
use sketch_gpu::GpuState;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::WebContainer;

/// A canvas plus the wgpu state drawing into it.
pub struct WebRenderer {
    canvas: web::HtmlCanvasElement,
    gpu: GpuState<'static>,
}

impl WebRenderer {
    /// Create a detached canvas and acquire a GPU context for it.
    pub async fn new(document: &web::Document, encoding: ColorEncoding) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        canvas.set_width(1);
        canvas.set_height(1);
        _ = canvas.style().set_property("display", "block");
        _ = canvas.style().set_property("touch-action", "none");

        let gpu = GpuState::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), 1, 1, encoding)
            .await
            .map_err(|e| anyhow::anyhow!("WebGPU/WebGL init error: {}", e))?;
        Ok(Self { canvas, gpu })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }
}

impl Renderer<WebContainer> for WebRenderer {
    fn configure(&mut self, surface: &RenderSurface) -> sketch_core::Result<()> {
        // backing store in device pixels, layout size in CSS pixels
        let (w_px, h_px) = surface.backing_size();
        self.canvas.set_width(w_px);
        self.canvas.set_height(h_px);
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{}px", surface.width));
        _ = style.set_property("height", &format!("{}px", surface.height));
        self.gpu.configure(surface);
        Ok(())
    }

    fn mount(&mut self, container: &WebContainer) -> sketch_core::Result<()> {
        container
            .element()
            .append_child(&self.canvas)
            .map_err(|e| SketchError::configuration(format!("cannot attach canvas: {:?}", e)))?;
        Ok(())
    }

    fn create_mesh(&mut self, object: &PlaneObject) -> sketch_core::Result<MeshHandle> {
        Ok(self.gpu.create_mesh(object))
    }

    fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> sketch_core::Result<()> {
        self.gpu.draw(scene, camera).map_err(SketchError::from)
    }
}
