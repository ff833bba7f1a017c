//! 2D camera: pan, zoom and rotation around the viewport center.
//!
//! `screen = R(rotation) * (world - position) * zoom + center`, with
//! `center = viewport_size / 2`. Screen space is surface pixels; world space
//! is whatever units the scene's entities are laid out in.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use orrery_animation_core::AnimatableValue;
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

/// Camera shared between pointer handling and the animation driving it.
pub type SharedCamera = Rc<RefCell<Camera>>;

/// Persistable camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraState {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
    pub rotation: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
            rotation: 0.0,
        }
    }
}

impl CameraState {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Read a pose back out of an animated `{x, y, zoom, rotation}` mapping.
    pub fn from_animatable(value: &AnimatableValue) -> Result<Self, ViewportError> {
        let field = |name: &str| {
            value
                .get_number(name)
                .ok_or_else(|| ViewportError::MissingCameraField {
                    field: name.to_string(),
                })
        };
        Ok(Self {
            x: field("x")?,
            y: field("y")?,
            zoom: field("zoom")?,
            rotation: field("rotation")?,
        })
    }
}

impl From<CameraState> for AnimatableValue {
    fn from(state: CameraState) -> Self {
        AnimatableValue::mapping([
            ("x", AnimatableValue::Number(state.x)),
            ("y", AnimatableValue::Number(state.y)),
            ("zoom", AnimatableValue::Number(state.zoom)),
            ("rotation", AnimatableValue::Number(state.rotation)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec2,
    zoom: f32,
    rotation: f32,
    viewport: Vec2,
    zoom_limits: (f32, f32),
}

impl Camera {
    pub const DEFAULT_ZOOM_LIMITS: (f32, f32) = (0.1, 10.0);

    /// Camera at the origin, zoom 1, for a surface of `viewport` pixels.
    pub fn new(viewport: Vec2) -> Result<Self, ViewportError> {
        validate_surface(viewport)?;
        Ok(Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
            viewport,
            zoom_limits: Self::DEFAULT_ZOOM_LIMITS,
        })
    }

    pub fn into_shared(self) -> SharedCamera {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    #[inline]
    pub fn zoom_limits(&self) -> (f32, f32) {
        self.zoom_limits
    }

    pub fn set_position(&mut self, position: Vec2) {
        if position.is_finite() {
            self.position = position;
        }
    }

    /// Set zoom, clamped to the current limits.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.zoom_limits.0, self.zoom_limits.1);
        }
    }

    pub fn set_rotation(&mut self, radians: f32) {
        if radians.is_finite() {
            self.rotation = radians;
        }
    }

    pub fn set_viewport_size(&mut self, viewport: Vec2) -> Result<(), ViewportError> {
        validate_surface(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    /// Replace the zoom bounds and re-clamp the current zoom into them.
    pub fn set_zoom_limits(&mut self, min: f32, max: f32) -> Result<(), ViewportError> {
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ViewportError::InvalidZoomLimits { min, max });
        }
        self.zoom_limits = (min, max);
        self.zoom = self.zoom.clamp(min, max);
        Ok(())
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::from_angle(self.rotation).rotate((world - self.position) * self.zoom) + self.center()
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(-self.rotation).rotate(screen - self.center()) / self.zoom
    }

    /// Drag the scene by a screen-space delta: the world point under the
    /// pointer follows the pointer, whatever the zoom or rotation.
    pub fn pan(&mut self, screen_delta: Vec2) {
        if !screen_delta.is_finite() {
            return;
        }
        self.position -= Vec2::from_angle(-self.rotation).rotate(screen_delta) / self.zoom;
    }

    /// Change zoom while keeping the world point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Vec2, zoom: f32) {
        if !(screen.is_finite() && zoom.is_finite()) {
            return;
        }
        let anchor = self.screen_to_world(screen);
        self.zoom = zoom.clamp(self.zoom_limits.0, self.zoom_limits.1);
        let drifted = self.screen_to_world(screen);
        self.position += anchor - drifted;
    }

    /// Multiply zoom by `factor` around `screen`.
    pub fn zoom_by(&mut self, screen: Vec2, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom_at(screen, self.zoom * factor);
        }
    }

    /// World-space AABB covering the whole viewport (rotation included).
    pub fn visible_world_bounds(&self) -> (Vec2, Vec2) {
        let corners = [
            Vec2::ZERO,
            Vec2::new(self.viewport.x, 0.0),
            Vec2::new(0.0, self.viewport.y),
            self.viewport,
        ];
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for corner in corners {
            let world = self.screen_to_world(corner);
            min = min.min(world);
            max = max.max(world);
        }
        (min, max)
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            x: self.position.x,
            y: self.position.y,
            zoom: self.zoom,
            rotation: self.rotation,
        }
    }

    /// Restore a pose. Zoom is clamped; non-finite fields are ignored.
    pub fn set_state(&mut self, state: CameraState) {
        self.set_position(Vec2::new(
            finite_or(state.x, self.position.x),
            finite_or(state.y, self.position.y),
        ));
        self.set_zoom(state.zoom);
        self.set_rotation(state.rotation);
    }

    pub fn to_animatable(&self) -> AnimatableValue {
        self.state().into()
    }

    pub fn apply_animatable(&mut self, value: &AnimatableValue) -> Result<(), ViewportError> {
        self.set_state(CameraState::from_animatable(value)?);
        Ok(())
    }
}

pub(crate) fn validate_surface(size: Vec2) -> Result<(), ViewportError> {
    if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
        Ok(())
    } else {
        Err(ViewportError::InvalidSurface {
            width: size.x,
            height: size.y,
        })
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(Vec2::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn zoom_at_center_keeps_origin() {
        let mut cam = camera();
        cam.zoom_at(Vec2::new(400.0, 300.0), 2.0);
        assert_eq!(cam.zoom(), 2.0);
        assert_eq!(cam.position(), Vec2::ZERO);
        assert_eq!(cam.screen_to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn zoom_anchors_point_under_cursor() {
        let mut cam = camera();
        cam.set_rotation(0.4);
        cam.set_position(Vec2::new(-30.0, 12.0));
        let cursor = Vec2::new(120.0, 515.0);
        let before = cam.screen_to_world(cursor);
        cam.zoom_at(cursor, 3.5);
        let after = cam.screen_to_world(cursor);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-3);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = camera();
        cam.zoom_at(Vec2::new(10.0, 10.0), 1000.0);
        assert_eq!(cam.zoom(), 10.0);
        cam.zoom_by(Vec2::ZERO, 1e-9);
        assert_eq!(cam.zoom(), 0.1);
        cam.zoom_by(Vec2::ZERO, -2.0);
        assert_eq!(cam.zoom(), 0.1);
    }

    #[test]
    fn pan_moves_world_with_pointer() {
        let mut cam = camera();
        cam.set_zoom(2.0);
        cam.set_rotation(std::f32::consts::FRAC_PI_2);
        let grab = Vec2::new(500.0, 200.0);
        let world = cam.screen_to_world(grab);
        let delta = Vec2::new(-40.0, 25.0);
        cam.pan(delta);
        let moved = cam.world_to_screen(world);
        assert_relative_eq!(moved.x, grab.x + delta.x, epsilon = 1e-3);
        assert_relative_eq!(moved.y, grab.y + delta.y, epsilon = 1e-3);
    }

    #[test]
    fn world_screen_round_trip() {
        let mut cam = camera();
        cam.set_state(CameraState {
            x: 55.0,
            y: -8.0,
            zoom: 0.75,
            rotation: -1.1,
        });
        let p = Vec2::new(-123.0, 456.0);
        let back = cam.screen_to_world(cam.world_to_screen(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-3);
    }

    #[test]
    fn visible_bounds_at_identity() {
        let mut cam = camera();
        cam.set_zoom(2.0);
        let (min, max) = cam.visible_world_bounds();
        assert_eq!(min, Vec2::new(-200.0, -150.0));
        assert_eq!(max, Vec2::new(200.0, 150.0));
    }

    #[test]
    fn invalid_surface_and_limits() {
        assert!(Camera::new(Vec2::new(0.0, 100.0)).is_err());
        assert!(Camera::new(Vec2::new(f32::NAN, 100.0)).is_err());
        let mut cam = camera();
        assert!(cam.set_zoom_limits(2.0, 1.0).is_err());
        assert!(cam.set_viewport_size(Vec2::new(100.0, -1.0)).is_err());
        cam.set_zoom(5.0);
        cam.set_zoom_limits(0.5, 2.0).unwrap();
        assert_eq!(cam.zoom(), 2.0);
    }

    #[test]
    fn state_through_animatable() {
        let mut cam = camera();
        let target = CameraState {
            x: 1.0,
            y: 2.0,
            zoom: 50.0,
            rotation: 0.5,
        };
        cam.apply_animatable(&target.into()).unwrap();
        assert_eq!(cam.state(), CameraState { zoom: 10.0, ..target });

        let partial = AnimatableValue::mapping([("x", AnimatableValue::Number(1.0))]);
        assert!(matches!(
            cam.apply_animatable(&partial),
            Err(ViewportError::MissingCameraField { .. })
        ));
    }
}
