//! The sketch controller: scene assembly, resize handling and the frame driver.
//!
//! The frame driver is cooperative. Every call to [`SketchController::on_frame`]
//! answers one earlier [`DisplayClock::request_frame`]; while playing, each
//! invocation advances `time`, requests the next frame and draws once.

use glam::Vec4;

use crate::camera::PerspectiveCamera;
use crate::config::{PlaybackMode, SketchConfig};
use crate::constants::FALLBACK_ASPECT;
use crate::error::{Result, SketchError};
use crate::host::{DisplayClock, PixelRatioProvider, Renderer, SizeSource};
use crate::material::{PlaneObject, ShaderMaterial};
use crate::orbit::OrbitControls;
use crate::scene::{MeshHandle, Scene};
use crate::settings::Settings;
use crate::surface::{normalize_pixel_ratio, RenderSurface};
use crate::uniforms::{ShaderUniformSet, UniformValue};

pub struct SketchController<C, R> {
    container: C,
    renderer: R,
    clock: Box<dyn DisplayClock>,
    pixel_ratio: Box<dyn PixelRatioProvider>,

    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    surface: RenderSurface,
    plane: MeshHandle,
    settings: Settings,

    mode: PlaybackMode,
    is_playing: bool,
    // only written in literal mode; never read by the frame driver
    playing: bool,
    time: f64,
    time_step: f64,
    pending_frames: u32,
}

impl<C, R> SketchController<C, R>
where
    C: SizeSource,
    R: Renderer<C>,
{
    /// Build the scene, size and mount the surface, add the plane, start
    /// listening for resizes and schedule the first frame.
    ///
    /// Fails with [`SketchError::Configuration`] before touching the renderer if
    /// the container is missing or the configuration is invalid.
    pub fn new(
        mut config: SketchConfig<C>,
        mut renderer: R,
        clock: Box<dyn DisplayClock>,
        pixel_ratio: Box<dyn PixelRatioProvider>,
    ) -> Result<Self> {
        let container = config
            .container
            .take()
            .ok_or_else(|| SketchError::configuration("container handle is missing"))?;
        config.validate()?;

        let mut scene = Scene::new();
        let mut camera = PerspectiveCamera::new(&config.camera, FALLBACK_ASPECT);

        let mut surface = RenderSurface::new(config.clear_color, config.output_encoding);
        let (width, height) = container.content_box().to_pixels();
        surface.set_pixel_ratio(pixel_ratio.device_pixel_ratio());
        surface.set_size(width, height);
        renderer.configure(&surface)?;
        if surface.is_degenerate() {
            log::warn!(
                "[sketch] container is {}x{} at startup; keeping fallback aspect {}",
                width,
                height,
                FALLBACK_ASPECT
            );
        } else {
            camera.aspect = width as f32 / height as f32;
            camera.update_projection_matrix();
        }

        renderer.mount(&container)?;

        let material = ShaderMaterial {
            uniforms: ShaderUniformSet {
                resolution: resolution_for(&surface),
                uv_rate1: config.uv_rate,
                ..ShaderUniformSet::default()
            },
            ..ShaderMaterial::default()
        };
        let plane = PlaneObject::new(config.plane, material);
        let handle = renderer.create_mesh(&plane)?;
        scene.add(handle, plane);

        container.watch_resize()?;

        let controls = OrbitControls::from_camera(&camera);
        let mut sketch = Self {
            container,
            renderer,
            clock,
            pixel_ratio,
            scene,
            camera,
            controls,
            surface,
            plane: handle,
            settings: Settings::default(),
            mode: config.playback,
            is_playing: true,
            playing: false,
            time: 0.0,
            time_step: config.time_step,
            pending_frames: 0,
        };
        sketch.request_frame();
        log::info!(
            "[sketch] started {}x{} @{}x, mode={:?}",
            width,
            height,
            sketch.surface.pixel_ratio,
            sketch.mode
        );
        Ok(sketch)
    }

    /// Re-read the container size and pixel ratio and apply them.
    ///
    /// Unchanged input is a no-op. A zero-sized container still resizes the
    /// surface but leaves the camera aspect alone and returns
    /// [`SketchError::DegenerateSize`].
    pub fn resize(&mut self) -> Result<()> {
        let (width, height) = self.container.content_box().to_pixels();
        let ratio = normalize_pixel_ratio(self.pixel_ratio.device_pixel_ratio());
        let changed = !self.surface.matches(width, height, ratio);

        if changed {
            // the surface only takes the new size once the renderer accepted it
            let mut candidate = self.surface.clone();
            candidate.set_pixel_ratio(ratio);
            candidate.set_size(width, height);
            self.renderer.configure(&candidate)?;
            self.surface = candidate;
            let resolution = resolution_for(&self.surface);
            if let Some(plane) = self.scene.get_mut(self.plane) {
                plane.material.uniforms.resolution = resolution;
            }
            log::debug!("[sketch] resized to {}x{} @{}x", width, height, ratio);
        }

        if self.surface.is_degenerate() {
            if changed {
                log::warn!(
                    "[sketch] degenerate container {}x{}; keeping aspect {}",
                    width,
                    height,
                    self.camera.aspect
                );
            }
            return Err(SketchError::DegenerateSize { width, height });
        }

        if changed {
            self.camera.aspect = width as f32 / height as f32;
            self.camera.update_projection_matrix();
        }
        Ok(())
    }

    /// Host callback for a frame requested through the display clock.
    pub fn on_frame(&mut self) -> Result<()> {
        self.pending_frames = self.pending_frames.saturating_sub(1);
        self.drive()
    }

    pub fn stop(&mut self) {
        match self.mode {
            PlaybackMode::Strict => {
                if self.is_playing {
                    log::info!("[sketch] stop at t={:.2}", self.time);
                }
                self.is_playing = false;
            }
            PlaybackMode::Literal => {
                self.playing = false;
            }
        }
    }

    /// Resume the loop. In strict mode a frame that is still outstanding picks
    /// the loop back up; otherwise the frame driver is entered directly.
    pub fn play(&mut self) -> Result<()> {
        match self.mode {
            PlaybackMode::Strict => {
                if self.is_playing {
                    return Ok(());
                }
                self.is_playing = true;
                log::info!("[sketch] play from t={:.2}", self.time);
                if self.pending_frames > 0 {
                    return Ok(());
                }
                self.drive()
            }
            PlaybackMode::Literal => {
                if self.playing {
                    return Ok(());
                }
                let result = self.drive();
                self.is_playing = true;
                result
            }
        }
    }

    pub fn toggle(&mut self) -> Result<()> {
        if self.is_playing {
            self.stop();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Orbit the camera by a pointer drag in CSS pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.controls.rotate(dx, dy, self.surface.height as f32);
        self.controls.apply(&mut self.camera);
    }

    /// Dolly the camera for a wheel delta; positive moves away.
    pub fn zoom(&mut self, wheel_delta: f32) {
        self.controls.dolly(wheel_delta);
        self.controls.apply(&mut self.camera);
    }

    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<()> {
        match self.scene.get_mut(self.plane) {
            Some(plane) => plane.material.uniforms.set(name, value),
            None => Err(SketchError::UnknownUniform(name.to_string())),
        }
    }

    pub fn set_progress(&mut self, value: f32) -> f32 {
        self.settings.set_progress(value)
    }

    fn drive(&mut self) -> Result<()> {
        if !self.is_playing {
            return Ok(());
        }
        self.time += self.time_step;
        let time = self.time as f32;
        if let Some(plane) = self.scene.get_mut(self.plane) {
            plane.material.uniforms.time = time;
        }
        self.request_frame();
        self.renderer.draw(&self.scene, &self.camera)
    }

    fn request_frame(&mut self) {
        self.pending_frames += 1;
        self.clock.request_frame();
    }
}

impl<C, R> SketchController<C, R> {
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn playback_mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Frames requested from the clock and not yet delivered.
    pub fn pending_frames(&self) -> u32 {
        self.pending_frames
    }

    pub fn uniforms(&self) -> Option<&ShaderUniformSet> {
        self.scene.get(self.plane).map(|p| &p.material.uniforms)
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

fn resolution_for(surface: &RenderSurface) -> Vec4 {
    Vec4::new(surface.width as f32, surface.height as f32, 1.0, 1.0)
}
