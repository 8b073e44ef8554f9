//! Sketch defaults.
//!
//! Frame step, camera framing, clear color and clamp limits shared by the
//! controller and the front-ends.

// Logical time added to the `time` uniform on every frame tick
pub const TIME_STEP: f64 = 0.05;

// Camera
pub const CAMERA_FOV_DEG: f32 = 70.0; // vertical field of view
pub const CAMERA_NEAR: f32 = 0.001;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 2.0];
// Aspect used until the container reports a non-degenerate size
pub const FALLBACK_ASPECT: f32 = 1.0;

// Surface
pub const CLEAR_COLOR_HEX: u32 = 0xeeeeee;
pub const CLEAR_ALPHA: f32 = 1.0;

// Plane geometry (unit quad, one cell)
pub const PLANE_WIDTH: f32 = 1.0;
pub const PLANE_HEIGHT: f32 = 1.0;
pub const PLANE_SEGMENTS: u32 = 1;

// Uniform defaults
pub const UV_RATE: [f32; 2] = [1.0, 1.0];

// Orbit controls
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SCALE: f32 = 0.95; // radius factor per wheel notch
pub const ORBIT_MIN_DISTANCE: f32 = 0.05;
pub const ORBIT_MAX_DISTANCE: f32 = 100.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-3; // keeps the camera off the poles; cos(eps) must stay below 1.0 in f32

// Debug panel parameter
pub const PROGRESS_MIN: f32 = 0.0;
pub const PROGRESS_MAX: f32 = 1.0;
pub const PROGRESS_STEP: f32 = 0.01;
