//! Error types for the viewport layer

use orrery_animation_core::AnimationError;
use serde::{Deserialize, Serialize};

/// Error type for camera, hit-testing and scene-view operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ViewportError {
    /// Rendering surface must be finite and non-empty
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSurface { width: f32, height: f32 },

    /// Zoom bounds must satisfy 0 < min <= max
    #[error("Invalid zoom limits: [{min}, {max}]")]
    InvalidZoomLimits { min: f32, max: f32 },

    /// A view configuration field is out of range
    #[error("Invalid view config '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// A call argument is unusable (e.g. a non-finite target)
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Particle emitter parameters rejected
    #[error("Invalid emitter: {reason}")]
    InvalidEmitter { reason: String },

    /// Animated camera value lacks a required key
    #[error("Camera value is missing numeric field '{field}'")]
    MissingCameraField { field: String },

    /// Error raised by the animation layer
    #[error(transparent)]
    Animation(#[from] AnimationError),

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl ViewportError {
    pub(crate) fn config(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn argument(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidSurface { .. }
            | Self::InvalidZoomLimits { .. }
            | Self::InvalidConfig { .. }
            | Self::InvalidArgument { .. }
            | Self::InvalidEmitter { .. }
            | Self::MissingCameraField { .. } => "validation",
            Self::Animation(inner) => inner.category(),
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for ViewportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_errors_keep_their_category() {
        let err: ViewportError = AnimationError::InvalidDuration { duration_ms: 0.0 }.into();
        assert_eq!(err.category(), "validation");
        assert!(err.to_string().contains("Invalid duration"));

        let err: ViewportError = AnimationError::AnimationNotFound {
            name: "camera".into(),
        }
        .into();
        assert_eq!(err.category(), "scheduler");
    }

    #[test]
    fn surface_error_message() {
        let err = ViewportError::InvalidSurface {
            width: 0.0,
            height: 600.0,
        };
        assert_eq!(err.to_string(), "Invalid surface size: 0x600");
    }
}
