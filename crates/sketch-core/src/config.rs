use glam::Vec2;

use crate::camera::CameraConfig;
use crate::constants::{TIME_STEP, UV_RATE};
use crate::error::{Result, SketchError};
use crate::geometry::PlaneGeometry;
use crate::surface::{ClearColor, ColorEncoding};

/// Which flags `stop()` and the frame driver agree on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackMode {
    /// One `is_playing` flag read by the loop and written by `play`/`stop`.
    #[default]
    Strict,
    /// `stop()` writes a `playing` flag the loop never reads, so the loop keeps
    /// running; `play()` re-enters the frame driver every time it is called.
    Literal,
}

impl std::str::FromStr for PlaybackMode {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "literal" => Ok(Self::Literal),
            other => Err(SketchError::configuration(format!(
                "unknown playback mode `{other}` (expected `strict` or `literal`)"
            ))),
        }
    }
}

/// Everything needed to build a [`crate::SketchController`].
#[derive(Clone, Debug)]
pub struct SketchConfig<C> {
    pub container: Option<C>,
    pub playback: PlaybackMode,
    pub time_step: f64,
    pub camera: CameraConfig,
    pub clear_color: ClearColor,
    pub output_encoding: ColorEncoding,
    pub plane: PlaneGeometry,
    pub uv_rate: Vec2,
}

impl<C> SketchConfig<C> {
    pub fn new(container: Option<C>) -> Self {
        Self {
            container,
            playback: PlaybackMode::default(),
            time_step: TIME_STEP,
            camera: CameraConfig::default(),
            clear_color: ClearColor::default(),
            output_encoding: ColorEncoding::default(),
            plane: PlaneGeometry::default(),
            uv_rate: Vec2::from(UV_RATE),
        }
    }

    pub fn with_playback(mut self, playback: PlaybackMode) -> Self {
        self.playback = playback;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_clear_color(mut self, clear_color: ClearColor) -> Self {
        self.clear_color = clear_color;
        self
    }

    /// Checks every numeric field. The container is checked separately so a
    /// missing container always reports as such.
    pub fn validate(&self) -> Result<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SketchError::configuration(format!(
                "time step must be positive and finite, got {}",
                self.time_step
            )));
        }
        self.camera.validate()?;
        if !(self.plane.width > 0.0 && self.plane.height > 0.0) {
            return Err(SketchError::configuration("plane size must be positive"));
        }
        if !self.uv_rate.is_finite() {
            return Err(SketchError::configuration("uv rate must be finite"));
        }
        Ok(())
    }
}
