use sketch_core::{ShaderMaterial, Side, Vertex};

pub(crate) const VERTEX_ENTRY: &str = "vs_main";
pub(crate) const FRAGMENT_ENTRY: &str = "fs_main";

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    pub(crate) projection: [[f32; 4]; 4],
    pub(crate) view: [[f32; 4]; 4],
}

/// Binding 0: camera matrices. Binding 1: the material's uniform set.
pub(crate) fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("plane_bgl"),
        entries: &[uniform_entry(0), uniform_entry(1)],
    })
}

// WGSL builtins that read screen-space derivatives
const DERIVATIVE_BUILTINS: [&str; 3] = ["fwidth", "dpdx", "dpdy"];

fn uses_derivatives(source: &str) -> bool {
    DERIVATIVE_BUILTINS.iter().any(|name| source.contains(name))
}

#[inline]
fn cull_mode(side: Side) -> Option<wgpu::Face> {
    match side {
        Side::Front => Some(wgpu::Face::Back),
        Side::Back => Some(wgpu::Face::Front),
        Side::Double => None,
    }
}

/// Compile the material's two shader stages into a pipeline drawing into `color_format`.
pub(crate) fn create_plane_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    material: &ShaderMaterial,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    if !material.derivatives && uses_derivatives(&material.fragment_shader) {
        log::warn!(
            "[gpu] fragment shader reads derivatives but the material does not declare them"
        );
    }
    let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("plane_vertex"),
        source: wgpu::ShaderSource::Wgsl(material.vertex_shader.clone()),
    });
    let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("plane_fragment"),
        source: wgpu::ShaderSource::Wgsl(material.fragment_shader.clone()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("plane_pl"),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("plane_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &vertex_module,
            entry_point: Some(VERTEX_ENTRY),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRIBUTES,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: cull_mode(material.side),
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &fragment_module,
            entry_point: Some(FRAGMENT_ENTRY),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
