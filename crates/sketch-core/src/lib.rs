//! Platform-agnostic core of the plane sketch.
//!
//! [`SketchController`] owns the scene, camera and surface state and drives the
//! animation loop; the page or window it runs in is reached only through the
//! traits in [`host`].

pub mod camera;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod host;
pub mod material;
pub mod orbit;
pub mod scene;
pub mod settings;
pub mod surface;
pub mod uniforms;

// Shaders bundled as string constants
pub static PLANE_VERTEX_WGSL: &str = include_str!("../shaders/plane_vertex.wgsl");
pub static PLANE_FRAGMENT_WGSL: &str = include_str!("../shaders/plane_fragment.wgsl");

pub use camera::{CameraConfig, PerspectiveCamera};
pub use config::{PlaybackMode, SketchConfig};
pub use controller::SketchController;
pub use error::{Result, SketchError};
pub use geometry::{PlaneGeometry, Vertex};
pub use host::{
    CoalescedClock, DisplayClock, FixedPixelRatio, PixelRatioProvider, Renderer, SizeSource,
};
pub use material::{PlaneObject, ShaderMaterial, Side};
pub use orbit::OrbitControls;
pub use scene::{MeshHandle, Scene, SceneObject};
pub use settings::{ParamRange, Settings, PROGRESS_RANGE};
pub use surface::{ClearColor, ColorEncoding, ContentBox, RenderSurface};
pub use uniforms::{PackedUniforms, ShaderUniformSet, UniformValue};
