//! Orrery Animation Core (engine-agnostic)
//!
//! Time-based interpolation for interactive scenes: easing curves, tweens
//! over nested numeric values, damped springs and a scheduler that drives
//! many named tweens from one shared frame loop. Nothing here touches a
//! renderer; hosts read interpolated values from callbacks.

pub mod config;
pub mod easing;
pub mod error;
pub mod interp;
pub mod scheduler;
pub mod spring;
pub mod state;
pub mod time;
pub mod tween;
pub mod value;

// Re-exports for consumers (viewport, hosts)
pub use config::Config;
pub use easing::Easing;
pub use error::AnimationError;
pub use interp::{interpolate, lerp_f32, progress_for};
pub use scheduler::{FrameLoop, NullFrameLoop, Scheduler, TickReport};
pub use spring::{Spring, SpringConfig, SpringStep};
pub use state::AnimationState;
pub use time::{AnimationTime, Clock, ManualClock, MonotonicClock};
pub use tween::{Animation, AnimationConfig, CompleteFn, TickOutcome, UpdateFn};
pub use value::{AnimatableValue, ValueKind};

/// Result type for animation operations
pub type Result<T> = core::result::Result<T, AnimationError>;
