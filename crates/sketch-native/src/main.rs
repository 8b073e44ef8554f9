use std::sync::Arc;

use sketch_core::{
    CoalescedClock, ContentBox, MeshHandle, PerspectiveCamera, PixelRatioProvider, PlaneObject,
    PlaybackMode, RenderSurface, Renderer, Scene, SizeSource, SketchConfig, SketchController,
    SketchError,
};
use sketch_gpu::GpuState;
use winit::{
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

const WINDOW_TITLE: &str = "Plane sketch (native)";
const PLAYBACK_ENV: &str = "SKETCH_PLAYBACK";

/// The window's client area, measured in logical pixels.
struct WindowContainer {
    window: Arc<Window>,
}

impl SizeSource for WindowContainer {
    fn content_box(&self) -> ContentBox {
        let size = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        ContentBox::new(size.width, size.height)
    }
}

struct WindowScale {
    window: Arc<Window>,
}

impl PixelRatioProvider for WindowScale {
    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }
}

struct NativeRenderer {
    gpu: GpuState<'static>,
}

impl Renderer<WindowContainer> for NativeRenderer {
    fn configure(&mut self, surface: &RenderSurface) -> sketch_core::Result<()> {
        self.gpu.configure(surface);
        Ok(())
    }

    fn mount(&mut self, container: &WindowContainer) -> sketch_core::Result<()> {
        // the surface already targets the window
        log::debug!("[native] drawing into window {:?}", container.window.id());
        Ok(())
    }

    fn create_mesh(&mut self, object: &PlaneObject) -> sketch_core::Result<MeshHandle> {
        Ok(self.gpu.create_mesh(object))
    }

    fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> sketch_core::Result<()> {
        self.gpu.draw(scene, camera).map_err(SketchError::from)
    }
}

type NativeSketch = SketchController<WindowContainer, NativeRenderer>;

fn sketch_err(e: SketchError) -> anyhow::Error {
    anyhow::anyhow!("{}", e)
}

fn playback_from_env() -> anyhow::Result<PlaybackMode> {
    match std::env::var(PLAYBACK_ENV) {
        Ok(raw) => raw.parse().map_err(sketch_err),
        Err(_) => Ok(PlaybackMode::default()),
    }
}

fn report(result: sketch_core::Result<()>) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_recoverable() => log::warn!("[native] {}", e),
        Err(e) => log::error!("[native] {}", e),
    }
}

#[derive(Default)]
struct Drag {
    active: bool,
    last: Option<PhysicalPosition<f64>>,
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let playback = playback_from_env()?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .build(&event_loop)?,
    );

    let config = SketchConfig::new(Some(WindowContainer {
        window: Arc::clone(&window),
    }))
    .with_playback(playback);
    let size = window.inner_size();
    let gpu = pollster::block_on(GpuState::new(
        Arc::clone(&window),
        size.width,
        size.height,
        config.output_encoding,
    ))
    .map_err(|e| anyhow::anyhow!("gpu init: {}", e))?;

    // winit merges redraw requests, so the clock counts them
    let clock = {
        let window = Arc::clone(&window);
        CoalescedClock::new(move || window.request_redraw())
    };
    let mut sketch: NativeSketch = SketchController::new(
        config,
        NativeRenderer { gpu },
        Box::new(clock.clone()),
        Box::new(WindowScale {
            window: Arc::clone(&window),
        }),
    )
    .map_err(sketch_err)?;
    log::info!("[native] sketch ready ({:?} playback)", playback);

    let mut drag = Drag::default();
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run(move |event, elwt| {
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::RedrawRequested => {
                for _ in 0..clock.take() {
                    report(sketch.on_frame());
                }
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                report(sketch.resize())
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Space => report(sketch.toggle()),
                KeyCode::Escape => elwt.exit(),
                _ => {}
            },
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                drag.active = state == ElementState::Pressed;
                if !drag.active {
                    drag.last = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if drag.active {
                    if let Some(last) = drag.last {
                        // orbit works in logical pixels, like the surface height
                        let scale = window.scale_factor();
                        let dx = ((position.x - last.x) / scale) as f32;
                        let dy = ((position.y - last.y) / scale) as f32;
                        sketch.orbit(dx, dy);
                    }
                }
                drag.last = Some(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let up = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y,
                };
                if up != 0.0 {
                    // scrolling up moves closer
                    sketch.zoom(-up.signum() as f32);
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}
