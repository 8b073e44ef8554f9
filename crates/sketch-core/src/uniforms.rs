use glam::{Vec2, Vec4};

use crate::constants::UV_RATE;
use crate::error::{Result, SketchError};

pub const TIME: &str = "time";
pub const RESOLUTION: &str = "resolution";
pub const UV_RATE1: &str = "uvRate1";

/// Typed value of a single named uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec4(Vec4),
}

impl UniformValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Vec2(_) => "vec2",
            Self::Vec4(_) => "vec4",
        }
    }
}

/// Uniform inputs shared by the plane's vertex and fragment stages.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderUniformSet {
    pub time: f32,
    pub resolution: Vec4,
    pub uv_rate1: Vec2,
}

impl Default for ShaderUniformSet {
    fn default() -> Self {
        Self {
            time: 0.0,
            resolution: Vec4::ZERO,
            uv_rate1: Vec2::from(UV_RATE),
        }
    }
}

impl ShaderUniformSet {
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        match name {
            TIME => Some(UniformValue::Float(self.time)),
            RESOLUTION => Some(UniformValue::Vec4(self.resolution)),
            UV_RATE1 => Some(UniformValue::Vec2(self.uv_rate1)),
            _ => None,
        }
    }

    /// Set a uniform by name. The value type must match the uniform's declared type.
    pub fn set(&mut self, name: &str, value: UniformValue) -> Result<()> {
        match (name, value) {
            (TIME, UniformValue::Float(v)) => self.time = v,
            (RESOLUTION, UniformValue::Vec4(v)) => self.resolution = v,
            (UV_RATE1, UniformValue::Vec2(v)) => self.uv_rate1 = v,
            (TIME, _) => return Err(type_error(TIME, "float")),
            (RESOLUTION, _) => return Err(type_error(RESOLUTION, "vec4")),
            (UV_RATE1, _) => return Err(type_error(UV_RATE1, "vec2")),
            _ => return Err(SketchError::UnknownUniform(name.to_string())),
        }
        Ok(())
    }

    /// GPU layout of this set, matching the `Sketch` struct in the plane shaders.
    pub fn packed(&self) -> PackedUniforms {
        PackedUniforms {
            resolution: self.resolution.to_array(),
            uv_rate1: self.uv_rate1.to_array(),
            time: self.time,
            _pad: 0.0,
        }
    }
}

fn type_error(name: &str, expected: &'static str) -> SketchError {
    SketchError::UniformType {
        name: name.to_string(),
        expected,
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedUniforms {
    pub resolution: [f32; 4],
    pub uv_rate1: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_by_name() {
        let mut u = ShaderUniformSet::default();
        assert_eq!(u.get("time"), Some(UniformValue::Float(0.0)));
        assert_eq!(u.get("uvRate1"), Some(UniformValue::Vec2(Vec2::ONE)));
        u.set("time", UniformValue::Float(1.5)).unwrap();
        assert_eq!(u.time, 1.5);
        assert!(u.get("progress").is_none());
    }

    #[test]
    fn set_rejects_wrong_type_and_name() {
        let mut u = ShaderUniformSet::default();
        let err = u.set("time", UniformValue::Vec2(Vec2::ZERO)).unwrap_err();
        assert!(matches!(err, SketchError::UniformType { expected: "float", .. }));
        let err = u.set("speed", UniformValue::Float(1.0)).unwrap_err();
        assert!(matches!(err, SketchError::UnknownUniform(n) if n == "speed"));
        assert_eq!(u, ShaderUniformSet::default());
    }

    #[test]
    fn packed_layout_is_32_bytes() {
        assert_eq!(std::mem::size_of::<PackedUniforms>(), 32);
        let mut u = ShaderUniformSet::default();
        u.time = 0.25;
        let bytes = bytemuck::bytes_of(&u.packed()).to_vec();
        let time = f32::from_ne_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);
        assert_eq!(time, 0.25);
    }
}
