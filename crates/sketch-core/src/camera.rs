//! Perspective camera used by the sketch.
//!
//! The projection matrix is cached and only recomputed when
//! [`PerspectiveCamera::update_projection_matrix`] is called, so changing the
//! aspect alone does not affect what is drawn until the camera is refreshed.

use glam::{Mat4, Vec3};

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_POSITION};
use crate::error::{Result, SketchError};

/// Construction parameters for [`PerspectiveCamera`].
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: Vec3::from(CAMERA_POSITION),
            target: Vec3::ZERO,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(SketchError::configuration(format!(
                "camera fov must be in (0, 180) degrees, got {}",
                self.fov_deg
            )));
        }
        if !(self.near.is_finite() && self.far.is_finite() && self.near > 0.0) {
            return Err(SketchError::configuration(
                "camera near/far planes must be finite and near must be positive",
            ));
        }
        if self.near >= self.far {
            return Err(SketchError::configuration(format!(
                "camera near plane ({}) must be closer than far plane ({})",
                self.near, self.far
            )));
        }
        if !self.position.is_finite() || !self.target.is_finite() {
            return Err(SketchError::configuration("camera position must be finite"));
        }
        if self.position == self.target {
            return Err(SketchError::configuration(
                "camera position must differ from its target",
            ));
        }
        Ok(())
    }
}

/// Right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            fov_deg: config.fov_deg,
            aspect,
            near: config.near,
            far: config.far,
            position: config.position,
            target: config.target,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the cached clip-space projection from the current fields.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far);
    }

    /// Cached projection; stale until [`Self::update_projection_matrix`] runs.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}
