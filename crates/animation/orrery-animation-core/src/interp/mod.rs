//! Interpolation helpers.
//!
//! One recursive function walks a pair of [`AnimatableValue`](crate::AnimatableValue)
//! trees and blends every numeric leaf.

pub mod functions;

pub use functions::{interpolate, lerp_f32, progress_for};
