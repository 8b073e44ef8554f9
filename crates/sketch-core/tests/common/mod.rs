// Fake host collaborators for driving SketchController without a display.

#![allow(dead_code)]
use sketch_core::{
    ContentBox, DisplayClock, MeshHandle, PerspectiveCamera, PixelRatioProvider, PlaneObject,
    PlaybackMode, RenderSurface, Renderer, Result, Scene, SizeSource, SketchConfig,
    SketchController, SketchError,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone)]
pub struct FakeContainer {
    pub size: Rc<Cell<(f64, f64)>>,
    pub watching: Rc<Cell<bool>>,
}

impl FakeContainer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Rc::new(Cell::new((width, height))),
            watching: Rc::new(Cell::new(false)),
        }
    }
}

impl SizeSource for FakeContainer {
    fn content_box(&self) -> ContentBox {
        let (w, h) = self.size.get();
        ContentBox::new(w, h)
    }

    fn watch_resize(&self) -> Result<()> {
        self.watching.set(true);
        Ok(())
    }
}

/// Counts outstanding frame requests; the test decides when they fire.
#[derive(Clone, Default)]
pub struct ManualClock {
    pub requests: Rc<Cell<u32>>,
}

impl DisplayClock for ManualClock {
    fn request_frame(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

/// Device pixel ratio the test can change between resizes.
#[derive(Clone)]
pub struct SharedPixelRatio(pub Rc<Cell<f64>>);

impl PixelRatioProvider for SharedPixelRatio {
    fn device_pixel_ratio(&self) -> f64 {
        self.0.get()
    }
}

pub fn backend_failure(msg: &str) -> SketchError {
    SketchError::backend(std::io::Error::other(msg.to_string()))
}

#[derive(Debug, Default)]
pub struct RenderLog {
    pub calls: Vec<&'static str>,
    pub configured: Vec<RenderSurface>,
    pub draws: u32,
    pub drawn_times: Vec<f32>,
    pub drawn_aspects: Vec<f32>,
}

#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub log: Rc<RefCell<RenderLog>>,
    // number of upcoming configure calls that fail
    pub fail_configure: Rc<Cell<u32>>,
    pub fail_draw: Rc<Cell<bool>>,
}

impl Renderer<FakeContainer> for RecordingRenderer {
    fn configure(&mut self, surface: &RenderSurface) -> Result<()> {
        let failures = self.fail_configure.get();
        if failures > 0 {
            self.fail_configure.set(failures - 1);
            return Err(backend_failure("surface configuration rejected"));
        }
        let mut log = self.log.borrow_mut();
        log.calls.push("configure");
        log.configured.push(surface.clone());
        Ok(())
    }

    fn mount(&mut self, _container: &FakeContainer) -> Result<()> {
        self.log.borrow_mut().calls.push("mount");
        Ok(())
    }

    fn create_mesh(&mut self, _object: &PlaneObject) -> Result<MeshHandle> {
        self.log.borrow_mut().calls.push("create_mesh");
        Ok(MeshHandle(0))
    }

    fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()> {
        if self.fail_draw.get() {
            return Err(backend_failure("device lost"));
        }
        let mut log = self.log.borrow_mut();
        log.draws += 1;
        if let Some(obj) = scene.objects().first() {
            log.drawn_times.push(obj.plane.material.uniforms.time);
        }
        log.drawn_aspects.push(camera.aspect);
        Ok(())
    }
}

pub type TestSketch = SketchController<FakeContainer, RecordingRenderer>;

pub struct Harness {
    pub sketch: TestSketch,
    pub container: FakeContainer,
    pub clock: ManualClock,
    pub log: Rc<RefCell<RenderLog>>,
    pub renderer: RecordingRenderer,
    pub pixel_ratio: Rc<Cell<f64>>,
}

impl Harness {
    pub fn new(width: f64, height: f64, mode: PlaybackMode) -> Self {
        let container = FakeContainer::new(width, height);
        let clock = ManualClock::default();
        let renderer = RecordingRenderer::default();
        let log = renderer.log.clone();
        let pixel_ratio = Rc::new(Cell::new(1.0));
        let config = SketchConfig::new(Some(container.clone())).with_playback(mode);
        let sketch = SketchController::new(
            config,
            renderer.clone(),
            Box::new(clock.clone()),
            Box::new(SharedPixelRatio(pixel_ratio.clone())),
        )
        .expect("sketch construction");
        Self {
            sketch,
            container,
            clock,
            log,
            renderer,
            pixel_ratio,
        }
    }

    pub fn strict() -> Self {
        Self::new(800.0, 600.0, PlaybackMode::Strict)
    }

    /// Deliver every frame requested so far; returns how many fired.
    pub fn pump(&mut self) -> u32 {
        let n = self.clock.requests.replace(0);
        for _ in 0..n {
            self.sketch.on_frame().expect("frame");
        }
        n
    }

    pub fn pump_n(&mut self, rounds: usize) {
        for _ in 0..rounds {
            self.pump();
        }
    }

    pub fn set_size(&self, width: f64, height: f64) {
        self.container.size.set((width, height));
    }

    pub fn set_pixel_ratio(&self, ratio: f64) {
        self.pixel_ratio.set(ratio);
    }

    pub fn uniform_time(&self) -> f32 {
        self.sketch.uniforms().expect("plane uniforms").time
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9 * b.abs().max(1.0)
}
