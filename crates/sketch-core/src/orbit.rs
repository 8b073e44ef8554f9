use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::camera::PerspectiveCamera;
use crate::constants::{
    ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_POLAR_EPSILON, ORBIT_ROTATE_SPEED,
    ORBIT_ZOOM_SCALE,
};

/// Drag-to-orbit and wheel-to-dolly around a fixed target.
///
/// State is a spherical offset from `target`: `theta` is the azimuth around +Y
/// measured from +Z, `phi` the polar angle from +Y.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub rotate_speed: f32,
    pub zoom_scale: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    radius: f32,
    theta: f32,
    phi: f32,
}

impl OrbitControls {
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };
        let mut controls = Self {
            target: camera.target,
            enabled: true,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_scale: ORBIT_ZOOM_SCALE,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            radius,
            theta,
            phi,
        };
        controls.clamp();
        controls
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Angle from +Y in radians.
    pub fn polar_angle(&self) -> f32 {
        self.phi
    }

    /// Rotate by a pointer drag of (`dx`, `dy`) pixels; dragging across the
    /// full viewport height turns the camera once around the target.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        self.theta -= TAU * dx / viewport_height * self.rotate_speed;
        self.phi -= TAU * dy / viewport_height * self.rotate_speed;
        self.clamp();
    }

    /// Dolly for a wheel delta; positive moves away from the target.
    pub fn dolly(&mut self, wheel_delta: f32) {
        if !self.enabled || wheel_delta == 0.0 || !wheel_delta.is_finite() {
            return;
        }
        if wheel_delta > 0.0 {
            self.radius /= self.zoom_scale;
        } else {
            self.radius *= self.zoom_scale;
        }
        self.clamp();
    }

    pub fn position(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * sin_phi * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * sin_phi * self.theta.cos(),
            )
    }

    /// Move the camera to the orbit position. Projection is not touched.
    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.position();
        camera.target = self.target;
    }

    fn clamp(&mut self) {
        self.phi = self
            .phi
            .clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraConfig;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(&CameraConfig::default(), 1.0)
    }

    #[test]
    fn round_trips_initial_position() {
        let cam = camera();
        let controls = OrbitControls::from_camera(&cam);
        assert!((controls.position() - cam.position).length() < 1e-5);
        assert!((controls.radius() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn half_height_drag_turns_half_way_round() {
        let mut cam = camera();
        let mut controls = OrbitControls::from_camera(&cam);
        controls.rotate(300.0, 0.0, 600.0);
        controls.apply(&mut cam);
        assert!((cam.position.z + 2.0).abs() < 1e-4);
        assert!((cam.position - cam.target).length() - 2.0 < 1e-4);
    }

    #[test]
    fn polar_angle_stays_off_the_pole() {
        let mut controls = OrbitControls::from_camera(&camera());
        controls.rotate(0.0, 10_000.0, 100.0);
        assert_eq!(controls.polar_angle(), ORBIT_POLAR_EPSILON);
        let p = controls.position();
        assert!(p.is_finite());
        assert!(p.y < controls.radius());
        assert!(Vec3::new(p.x, 0.0, p.z).length() > 0.0);

        controls.rotate(0.0, -10_000.0, 100.0);
        assert_eq!(controls.polar_angle(), PI - ORBIT_POLAR_EPSILON);
        assert!(controls.position().y > -controls.radius());
    }

    #[test]
    fn dolly_respects_limits() {
        let mut controls = OrbitControls::from_camera(&camera());
        controls.dolly(1.0);
        assert!((controls.radius() - 2.0 / 0.95).abs() < 1e-5);
        for _ in 0..500 {
            controls.dolly(-1.0);
        }
        assert_eq!(controls.radius(), ORBIT_MIN_DISTANCE);
        for _ in 0..500 {
            controls.dolly(1.0);
        }
        assert_eq!(controls.radius(), ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut controls = OrbitControls::from_camera(&camera());
        controls.enabled = false;
        let before = controls.position();
        controls.rotate(50.0, 50.0, 600.0);
        controls.dolly(1.0);
        assert_eq!(controls.position(), before);
    }
}
