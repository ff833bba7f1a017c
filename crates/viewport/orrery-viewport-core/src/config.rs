//! Interaction and camera tunables for a [`crate::SceneView`].

use orrery_animation_core::Easing;
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;
use crate::hit_test::HitOrder;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub initial_zoom: f32,
    /// Zoom factor per wheel unit is `exp(-delta * wheel_zoom_speed)`.
    pub wheel_zoom_speed: f32,
    /// Pointer travel (screen px) before a press turns into a drag.
    pub drag_threshold_px: f32,
    pub focus_duration_ms: f64,
    pub focus_easing: Easing,
    pub key_pan_step_px: f32,
    /// Multiplier applied by one zoom-in key press (its inverse zooms out).
    pub key_zoom_factor: f32,
    pub hit_order: HitOrder,
    pub max_particles: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.1,
            zoom_max: 10.0,
            initial_zoom: 1.0,
            wheel_zoom_speed: 0.0015,
            drag_threshold_px: 4.0,
            focus_duration_ms: 600.0,
            focus_easing: Easing::EaseInOutCubic,
            key_pan_step_px: 50.0,
            key_zoom_factor: 1.2,
            hit_order: HitOrder::Topmost,
            max_particles: 512,
        }
    }
}

impl ViewConfig {
    /// Parse and validate a JSON config document; absent fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ViewportError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ViewportError> {
        let (min, max) = (self.zoom_min, self.zoom_max);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ViewportError::InvalidZoomLimits { min, max });
        }
        if !(self.initial_zoom.is_finite() && self.initial_zoom > 0.0) {
            return Err(ViewportError::config("initial_zoom", "must be finite and > 0"));
        }
        if !self.wheel_zoom_speed.is_finite() {
            return Err(ViewportError::config("wheel_zoom_speed", "must be finite"));
        }
        if !(self.drag_threshold_px.is_finite() && self.drag_threshold_px >= 0.0) {
            return Err(ViewportError::config("drag_threshold_px", "must be >= 0"));
        }
        if !(self.focus_duration_ms.is_finite() && self.focus_duration_ms > 0.0) {
            return Err(ViewportError::config("focus_duration_ms", "must be > 0"));
        }
        if !(self.key_pan_step_px.is_finite() && self.key_pan_step_px >= 0.0) {
            return Err(ViewportError::config("key_pan_step_px", "must be >= 0"));
        }
        if !(self.key_zoom_factor.is_finite() && self.key_zoom_factor > 0.0) {
            return Err(ViewportError::config("key_zoom_factor", "must be > 0"));
        }
        Ok(())
    }
}
