//! Seams between the controller and its environment.
//!
//! Everything the sketch needs from the page or window (container size, the
//! next-display-frame primitive, pixel density, a GPU) comes in through these
//! traits, so the controller runs the same on the web, natively and under test.

use std::cell::Cell;
use std::rc::Rc;

use crate::camera::PerspectiveCamera;
use crate::error::Result;
use crate::material::PlaneObject;
use crate::scene::{MeshHandle, Scene};
use crate::surface::{ContentBox, RenderSurface};

/// The container the sketch renders into.
pub trait SizeSource {
    /// Current content-box size in CSS pixels.
    fn content_box(&self) -> ContentBox;

    /// Start delivering size-change notifications. The host answers each one by
    /// calling [`crate::SketchController::resize`].
    fn watch_resize(&self) -> Result<()> {
        Ok(())
    }
}

/// "Run on next display frame". Each request must be answered by exactly one
/// call to [`crate::SketchController::on_frame`].
pub trait DisplayClock {
    fn request_frame(&self);
}

/// Clock for hosts whose wake-up primitive coalesces, such as a window redraw
/// request: many requests may produce a single redraw event.
///
/// Requests are counted. On each wake-up the host calls
/// [`CoalescedClock::take`] and answers every counted request with one
/// `on_frame`, so concurrent loop chains stay distinct.
#[derive(Clone)]
pub struct CoalescedClock {
    outstanding: Rc<Cell<u32>>,
    wake: Rc<dyn Fn()>,
}

impl CoalescedClock {
    pub fn new(wake: impl Fn() + 'static) -> Self {
        Self {
            outstanding: Rc::new(Cell::new(0)),
            wake: Rc::new(wake),
        }
    }

    /// Requests not yet handed out by [`CoalescedClock::take`].
    pub fn outstanding(&self) -> u32 {
        self.outstanding.get()
    }

    /// Drain the counted requests. Frames requested while answering them
    /// belong to the next wake-up.
    pub fn take(&self) -> u32 {
        self.outstanding.replace(0)
    }
}

impl DisplayClock for CoalescedClock {
    fn request_frame(&self) {
        self.outstanding.set(self.outstanding.get() + 1);
        (self.wake)();
    }
}

pub trait PixelRatioProvider {
    fn device_pixel_ratio(&self) -> f64;
}

/// Rendering capability surface consumed by the controller.
pub trait Renderer<C: ?Sized> {
    /// Apply size, pixel ratio and clear color to the drawable.
    fn configure(&mut self, surface: &RenderSurface) -> Result<()>;

    /// Attach the drawable to the container.
    fn mount(&mut self, container: &C) -> Result<()>;

    /// Build GPU resources for `object` (buffers, shader stages, uniform bindings).
    fn create_mesh(&mut self, object: &PlaneObject) -> Result<MeshHandle>;

    fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()>;
}

/// Pixel ratio that never changes.
#[derive(Clone, Copy, Debug)]
pub struct FixedPixelRatio(pub f64);

impl PixelRatioProvider for FixedPixelRatio {
    fn device_pixel_ratio(&self) -> f64 {
        self.0
    }
}
