use thiserror::Error;

/// Errors raised by the sketch controller and its collaborators.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Missing container or invalid configuration; construction stops before any
    /// scene object exists.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The container reported a zero-sized content box. The surface still takes the
    /// new size but the camera keeps its previous aspect.
    #[error("degenerate container size {width}x{height}; camera projection left unchanged")]
    DegenerateSize { width: u32, height: u32 },

    #[error("unknown uniform `{0}`")]
    UnknownUniform(String),

    #[error("uniform `{name}` expects a {expected} value")]
    UniformType { name: String, expected: &'static str },

    /// Failure inside the rendering backend (adapter, device, surface, shader).
    #[error("render backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + 'static>),
}

impl SketchError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn backend(err: impl std::error::Error + 'static) -> Self {
        Self::Backend(Box::new(err))
    }

    /// Whether the caller can keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DegenerateSize { .. } | Self::UnknownUniform(_) | Self::UniformType { .. }
        )
    }
}

pub type Result<T, E = SketchError> = std::result::Result<T, E>;
