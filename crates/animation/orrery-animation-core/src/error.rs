//! Error types for tweening, springs and the scheduler

use serde::{Deserialize, Serialize};

/// Error type for animation construction and per-tick failures
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Duration must be finite and strictly positive
    #[error("Invalid duration: {duration_ms} ms (must be > 0)")]
    InvalidDuration { duration_ms: f64 },

    /// Invalid time value
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f64 },

    /// `from` and `to` trees do not line up
    #[error("Value shape mismatch at '{path}': {reason}")]
    ShapeMismatch { path: String, reason: String },

    /// Spring parameters rejected at construction
    #[error("Invalid spring parameters: {reason}")]
    InvalidSpring { reason: String },

    /// Update or completion callback reported a failure
    #[error("Callback failed for animation '{name}': {reason}")]
    Callback { name: String, reason: String },

    /// No animation registered under this name
    #[error("Animation not found: {name}")]
    AnimationNotFound { name: String },

    /// Transition not allowed by the animation state machine
    #[error("Invalid animation state: {current_state} -> {requested_state}")]
    InvalidState {
        current_state: String,
        requested_state: String,
    },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic animation error
    #[error("Animation error: {message}")]
    Generic { message: String },
}

impl AnimationError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Errors raised while ticking that leave the scheduler usable.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Callback { .. } | Self::AnimationNotFound { .. } | Self::InvalidState { .. }
        )
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. }
            | Self::InvalidTime { .. }
            | Self::ShapeMismatch { .. }
            | Self::InvalidSpring { .. } => "validation",
            Self::Callback { .. } => "callback",
            Self::AnimationNotFound { .. } | Self::InvalidState { .. } => "scheduler",
            Self::SerializationError { .. } => "serialization",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
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
    fn test_error_creation() {
        let error = AnimationError::new("test error");
        assert!(matches!(error, AnimationError::Generic { .. }));
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = AnimationError::Callback {
            name: "camera".to_string(),
            reason: "boom".to_string(),
        };
        assert!(recoverable.is_recoverable());

        let non_recoverable = AnimationError::InvalidDuration { duration_ms: 0.0 };
        assert!(!non_recoverable.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        let shape = AnimationError::ShapeMismatch {
            path: "$.x".to_string(),
            reason: "missing".to_string(),
        };
        assert_eq!(shape.category(), "validation");

        let missing = AnimationError::AnimationNotFound {
            name: "planet:3".to_string(),
        };
        assert_eq!(missing.category(), "scheduler");
    }

    #[test]
    fn test_serialization() {
        let error = AnimationError::InvalidDuration { duration_ms: -5.0 };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: AnimationError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
