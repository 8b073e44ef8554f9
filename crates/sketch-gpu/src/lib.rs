//! wgpu backend for the plane sketch.
//!
//! [`GpuState`] owns the surface, device and per-mesh resources. Front-ends wrap
//! it in their own [`sketch_core::Renderer`] implementation, since mounting the
//! drawable differs between a page and a native window.

use sketch_core::{
    ColorEncoding, MeshHandle, PackedUniforms, PerspectiveCamera, PlaneObject, RenderSurface,
    Scene, SketchError,
};
use thiserror::Error;
use wgpu::util::DeviceExt;

mod pipeline;

use pipeline::{create_bind_group_layout, create_plane_pipeline, CameraUniforms};

#[derive(Debug, Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error(transparent)]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error(transparent)]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("no mesh for handle {0}")]
    UnknownMesh(usize),
}

impl From<GpuError> for SketchError {
    fn from(err: GpuError) -> Self {
        SketchError::backend(err)
    }
}

struct GpuMesh {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    bind_group_layout: wgpu::BindGroupLayout,
    camera_buffer: wgpu::Buffer,
    meshes: Vec<GpuMesh>,
    encoding: ColorEncoding,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        width: u32,
        height: u32,
        encoding: ColorEncoding,
    ) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;
        log::info!("[gpu] adapter: {:?}", adapter.get_info().backend);

        // WebGL2 caps the limits we may ask for
        let required_limits = if cfg!(target_arch = "wasm32") {
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
        } else {
            wgpu::Limits::default()
        };
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;
        device.on_uncaptured_error(Box::new(|e| {
            log::error!("[gpu] uncaptured error: {}", e);
        }));

        let caps = surface.get_capabilities(&adapter);
        let wants_srgb = encoding == ColorEncoding::Srgb;
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb() == wants_srgb)
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let bind_group_layout = create_bind_group_layout(&device);
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            bind_group_layout,
            camera_buffer,
            meshes: Vec::new(),
            encoding,
            clear_color: wgpu::Color::BLACK,
        })
    }

    /// Backing-store size in device pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Resize the swapchain to the surface's backing size and take its clear color.
    pub fn configure(&mut self, surface: &RenderSurface) {
        let [r, g, b, a] = surface.clear_color.for_encoding(self.encoding);
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };
        let max = self.device.limits().max_texture_dimension_2d;
        let (w, h) = surface.backing_size();
        let (w, h) = (w.min(max), h.min(max));
        if (w, h) != self.size() {
            self.config.width = w;
            self.config.height = h;
            self.surface.configure(&self.device, &self.config);
            log::debug!("[gpu] surface configured {}x{}", w, h);
        }
    }

    pub fn create_mesh(&mut self, object: &PlaneObject) -> MeshHandle {
        let pipeline = create_plane_pipeline(
            &self.device,
            &self.bind_group_layout,
            &object.material,
            self.config.format,
        );
        let vertices = object.geometry.vertices();
        let indices = object.geometry.indices();
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("plane_vb"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("plane_ib"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let uniform_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("plane_uniforms"),
                contents: bytemuck::bytes_of(&object.material.uniforms.packed()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("plane_bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let handle = MeshHandle(self.meshes.len());
        self.meshes.push(GpuMesh {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            uniform_buffer,
            bind_group,
        });
        log::debug!(
            "[gpu] mesh {} created: {} vertices, {} indices",
            handle.0,
            vertices.len(),
            indices.len()
        );
        handle
    }

    /// Draw every scene object through `camera`. A lost or outdated surface is
    /// reconfigured and the frame skipped.
    pub fn draw(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), GpuError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("[gpu] surface timeout; skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniforms {
                projection: camera.projection_matrix().to_cols_array_2d(),
                view: camera.view_matrix().to_cols_array_2d(),
            }),
        );
        for object in scene.objects() {
            let mesh = self
                .meshes
                .get(object.handle.0)
                .ok_or(GpuError::UnknownMesh(object.handle.0))?;
            let packed: PackedUniforms = object.plane.material.uniforms.packed();
            self.queue
                .write_buffer(&mesh.uniform_buffer, 0, bytemuck::bytes_of(&packed));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            for object in scene.objects() {
                let Some(mesh) = self.meshes.get(object.handle.0) else {
                    continue;
                };
                rpass.set_pipeline(&mesh.pipeline);
                rpass.set_bind_group(0, &mesh.bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
