//! Orrery Viewport Core (engine-agnostic)
//!
//! Interaction layer for pannable, zoomable 2D scenes: camera math, pointer
//! picking, selection notifications and decorative particles, tied together
//! by [`SceneView`]. Animation comes from `orrery-animation-core`; drawing is
//! left to the host.

pub mod camera;
pub mod config;
pub mod error;
pub mod particles;
pub mod selection;
pub mod view;

// Re-exports for consumers (hosts)
pub use camera::{Camera, CameraState, SharedCamera};
pub use config::ViewConfig;
pub use error::ViewportError;
pub use hit_test::{HitOrder, HitTarget, HitTester};
pub use particles::{EmitterConfig, Particle, ParticleSystem};
pub use selection::{SelectionCallback, SelectionEvent, SelectionObservers, SubscriptionId};
pub use view::{KeyCommand, SceneView, CAMERA_ANIMATION};

pub use glam::Vec2;

/// Result type for viewport operations
pub type Result<T> = core::result::Result<T, ViewportError>;
