use std::borrow::Cow;

use crate::geometry::PlaneGeometry;
use crate::uniforms::ShaderUniformSet;
use crate::{PLANE_FRAGMENT_WGSL, PLANE_VERTEX_WGSL};

/// Which triangle faces are rasterized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
    #[default]
    Double,
}

/// Shader program plus the uniform values it reads.
#[derive(Clone, Debug)]
pub struct ShaderMaterial {
    pub uniforms: ShaderUniformSet,
    pub vertex_shader: Cow<'static, str>,
    pub fragment_shader: Cow<'static, str>,
    pub side: Side,
    // fragment stage uses screen-space derivatives (fwidth)
    pub derivatives: bool,
}

impl Default for ShaderMaterial {
    fn default() -> Self {
        Self {
            uniforms: ShaderUniformSet::default(),
            vertex_shader: Cow::Borrowed(PLANE_VERTEX_WGSL),
            fragment_shader: Cow::Borrowed(PLANE_FRAGMENT_WGSL),
            side: Side::Double,
            derivatives: true,
        }
    }
}

/// The single shaded object in the sketch.
#[derive(Clone, Debug, Default)]
pub struct PlaneObject {
    pub geometry: PlaneGeometry,
    pub material: ShaderMaterial,
}

impl PlaneObject {
    pub fn new(geometry: PlaneGeometry, material: ShaderMaterial) -> Self {
        Self { geometry, material }
    }
}
