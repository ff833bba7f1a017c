//! Interactive scene component.
//!
//! A `SceneView` owns everything one visualization needs between input and
//! rendering: the scheduler for its animations, the camera (shared with the
//! camera animation through `Rc<RefCell<_>>`), a hit tester, selection
//! subscribers and a particle pool. Entity geometry is not stored; callers
//! pass the current `HitTarget`s with each pointer event.

use anyhow::anyhow;
use glam::Vec2;
use log::{debug, trace};
use orrery_animation_core::{AnimationConfig, AnimationTime, Scheduler, TickReport};
use serde::{Deserialize, Serialize};

use crate::camera::{validate_surface, Camera, CameraState, SharedCamera};
use crate::config::ViewConfig;
use crate::error::ViewportError;
use crate::hit_test::{HitTarget, HitTester};
use crate::particles::{EmitterConfig, ParticleSystem};
use crate::selection::{SelectionEvent, SelectionObservers, SubscriptionId};

/// Scheduler entry used for camera moves.
pub const CAMERA_ANIMATION: &str = "camera";

/// Discrete keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    /// Back to the origin at the configured initial zoom.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pointer {
    Idle,
    Pressed {
        origin: Vec2,
        last: Vec2,
        dragging: bool,
    },
}

pub struct SceneView<Id> {
    config: ViewConfig,
    scheduler: Scheduler,
    camera: SharedCamera,
    hit_tester: HitTester,
    observers: SelectionObservers<Id>,
    particles: ParticleSystem,
    pointer: Pointer,
    hovered: Option<Id>,
    last_tick: Option<AnimationTime>,
}

impl<Id: Clone + PartialEq> SceneView<Id> {
    /// Build a view for a `surface`-sized canvas around `scheduler` (which
    /// carries the host's clock and frame loop).
    pub fn new(surface: Vec2, config: ViewConfig, scheduler: Scheduler) -> Result<Self, ViewportError> {
        validate_surface(surface)?;
        config.validate()?;

        let mut camera = Camera::new(surface)?;
        camera.set_zoom_limits(config.zoom_min, config.zoom_max)?;
        camera.set_zoom(config.initial_zoom);

        Ok(Self {
            hit_tester: HitTester::new(config.hit_order),
            particles: ParticleSystem::new(config.max_particles, 0),
            config,
            scheduler,
            camera: camera.into_shared(),
            observers: SelectionObservers::new(),
            pointer: Pointer::Idle,
            hovered: None,
            last_tick: None,
        })
    }

    /// Reseed the particle pool (it starts from seed 0).
    pub fn with_particle_seed(mut self, seed: u64) -> Self {
        self.particles = ParticleSystem::new(self.config.max_particles, seed);
        self
    }

    #[inline]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Another handle to the shared camera.
    pub fn camera(&self) -> SharedCamera {
        self.camera.clone()
    }

    pub fn camera_state(&self) -> CameraState {
        self.camera.borrow().state()
    }

    /// Jump to a saved pose, cancelling any camera animation.
    pub fn restore_camera_state(&mut self, state: CameraState) {
        self.cancel_camera_animation();
        self.camera.borrow_mut().set_state(state);
    }

    pub fn resize(&mut self, surface: Vec2) -> Result<(), ViewportError> {
        self.camera.borrow_mut().set_viewport_size(surface)
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    #[inline]
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    #[inline]
    pub fn hovered(&self) -> Option<&Id> {
        self.hovered.as_ref()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.pointer, Pointer::Pressed { dragging: true, .. })
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SelectionEvent<Id>) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Begin a press. Any running camera animation yields to the user.
    pub fn pointer_down(&mut self, screen: Vec2) {
        if !screen.is_finite() {
            return;
        }
        self.cancel_camera_animation();
        self.pointer = Pointer::Pressed {
            origin: screen,
            last: screen,
            dragging: false,
        };
    }

    /// Pan while dragging; otherwise track hover. Returns the emitted event.
    pub fn pointer_move<'a>(
        &mut self,
        screen: Vec2,
        targets: impl IntoIterator<Item = &'a HitTarget<Id>>,
    ) -> Option<SelectionEvent<Id>>
    where
        Id: 'a,
    {
        if !screen.is_finite() {
            return None;
        }
        match &mut self.pointer {
            Pointer::Pressed {
                origin,
                last,
                dragging,
            } => {
                if !*dragging && origin.distance(screen) > self.config.drag_threshold_px {
                    *dragging = true;
                    debug!("drag started at {origin}");
                }
                if *dragging {
                    self.camera.borrow_mut().pan(screen - *last);
                    *last = screen;
                }
                None
            }
            Pointer::Idle => {
                let hit = {
                    let camera = self.camera.borrow();
                    self.hit_tester
                        .hit_test(&camera, screen, targets)
                        .map(|t| t.id.clone())
                };
                if hit == self.hovered {
                    return None;
                }
                self.hovered = hit.clone();
                Some(self.emit(SelectionEvent::Hovered(hit)))
            }
        }
    }

    /// End a press. A press that never became a drag is a click: it selects
    /// the entity under the pointer or clears the selection.
    pub fn pointer_up<'a>(
        &mut self,
        screen: Vec2,
        targets: impl IntoIterator<Item = &'a HitTarget<Id>>,
    ) -> Option<SelectionEvent<Id>>
    where
        Id: 'a,
    {
        let pointer = std::mem::replace(&mut self.pointer, Pointer::Idle);
        match pointer {
            Pointer::Idle => None,
            Pointer::Pressed {
                last,
                dragging: true,
                ..
            } => {
                if screen.is_finite() {
                    self.camera.borrow_mut().pan(screen - last);
                }
                None
            }
            Pointer::Pressed {
                origin,
                dragging: false,
                ..
            } => {
                let at = if screen.is_finite() { screen } else { origin };
                let hit = {
                    let camera = self.camera.borrow();
                    self.hit_tester
                        .hit_test(&camera, at, targets)
                        .map(|t| t.id.clone())
                };
                let event = match hit {
                    Some(id) => SelectionEvent::Selected(id),
                    None => SelectionEvent::Cleared,
                };
                Some(self.emit(event))
            }
        }
    }

    /// Abandon a press without selecting (pointer left the surface).
    pub fn pointer_cancel(&mut self) {
        self.pointer = Pointer::Idle;
    }

    /// Zoom around `screen`. Positive `delta` (scrolling down) zooms out.
    pub fn wheel(&mut self, screen: Vec2, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.cancel_camera_animation();
        let factor = (-delta * self.config.wheel_zoom_speed).exp();
        self.camera.borrow_mut().zoom_by(screen, factor);
    }

    pub fn key(&mut self, command: KeyCommand) {
        self.cancel_camera_animation();
        let step = self.config.key_pan_step_px;
        let mut camera = self.camera.borrow_mut();
        let center = camera.center();
        match command {
            // Panning moves the view, so the scene shifts the other way.
            KeyCommand::PanLeft => camera.pan(Vec2::new(step, 0.0)),
            KeyCommand::PanRight => camera.pan(Vec2::new(-step, 0.0)),
            KeyCommand::PanUp => camera.pan(Vec2::new(0.0, step)),
            KeyCommand::PanDown => camera.pan(Vec2::new(0.0, -step)),
            KeyCommand::ZoomIn => camera.zoom_by(center, self.config.key_zoom_factor),
            KeyCommand::ZoomOut => camera.zoom_by(center, self.config.key_zoom_factor.recip()),
            KeyCommand::Reset => camera.set_state(CameraState {
                zoom: self.config.initial_zoom,
                ..CameraState::default()
            }),
        }
    }

    /// Marquee selection over the screen rectangle spanned by `a` and `b`.
    pub fn select_rect<'a>(
        &mut self,
        a: Vec2,
        b: Vec2,
        targets: impl IntoIterator<Item = &'a HitTarget<Id>>,
    ) -> SelectionEvent<Id>
    where
        Id: 'a,
    {
        let ids = {
            let camera = self.camera.borrow();
            self.hit_tester
                .query_rect(&camera, a, b, targets)
                .into_iter()
                .map(|t| t.id.clone())
                .collect()
        };
        self.emit(SelectionEvent::MultiSelected(ids))
    }

    /// Animate the camera to center `world`, optionally changing zoom.
    /// Replaces any camera animation already in flight.
    pub fn focus_on(&mut self, world: Vec2, zoom: Option<f32>) -> Result<(), ViewportError> {
        if !world.is_finite() {
            return Err(ViewportError::argument("world", "focus target must be finite"));
        }
        let from = self.camera.borrow().state();
        let (min, max) = self.camera_zoom_limits();
        let target = CameraState {
            x: world.x,
            y: world.y,
            zoom: zoom.filter(|z| z.is_finite()).unwrap_or(from.zoom).clamp(min, max),
            rotation: from.rotation,
        };
        self.animate_camera(from, target)
    }

    /// Animate from the current pose to `target` with the focus timing.
    pub fn animate_camera_to(&mut self, target: CameraState) -> Result<(), ViewportError> {
        let from = self.camera.borrow().state();
        self.animate_camera(from, target)
    }

    /// Advance animations and particles to the scheduler clock's reading.
    ///
    /// Animations take their start time from the same clock, so hosts feed
    /// frame timestamps through a [`orrery_animation_core::Clock`] rather
    /// than passing them here.
    pub fn tick(&mut self) -> TickReport {
        let now = self.scheduler.now();
        let dt = self
            .last_tick
            .map(|last| now.saturating_since(last).as_seconds() as f32)
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        let report = self.scheduler.tick_at(now);
        let live = self.particles.update(dt);
        trace!("scene tick: {} animations, {live} particles", report.active);
        report
    }

    /// Spawn decorative particles at a world position.
    pub fn burst(&mut self, world: Vec2, emitter: &EmitterConfig) -> Result<usize, ViewportError> {
        self.particles.burst(world, emitter)
    }

    /// Tear down: animations dropped, frame loop halted, subscribers and
    /// particles cleared. The camera pose is left as is.
    pub fn destroy(&mut self) {
        self.scheduler.destroy();
        self.observers.clear();
        self.particles.clear();
        self.pointer = Pointer::Idle;
        self.hovered = None;
        self.last_tick = None;
    }

    fn animate_camera(&mut self, from: CameraState, to: CameraState) -> Result<(), ViewportError> {
        let camera = self.camera.clone();
        let config = AnimationConfig::new(from, to, self.config.focus_duration_ms)
            .easing(self.config.focus_easing)
            .on_update(move |value| {
                let mut camera = camera
                    .try_borrow_mut()
                    .map_err(|_| anyhow!("camera is borrowed elsewhere"))?;
                camera.apply_animatable(value)?;
                Ok(())
            });
        self.scheduler.animate(CAMERA_ANIMATION, config)?;
        debug!("camera animating to ({}, {}) zoom {}", to.x, to.y, to.zoom);
        Ok(())
    }

    fn cancel_camera_animation(&mut self) {
        if self.scheduler.stop(CAMERA_ANIMATION) {
            debug!("camera animation cancelled by input");
        }
    }

    fn camera_zoom_limits(&self) -> (f32, f32) {
        self.camera.borrow().zoom_limits()
    }

    fn emit(&mut self, event: SelectionEvent<Id>) -> SelectionEvent<Id> {
        self.observers.emit(&event);
        event
    }
}

impl<Id> std::fmt::Debug for SceneView<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneView")
            .field("config", &self.config)
            .field("scheduler", &self.scheduler)
            .field("camera", &self.camera)
            .field("observers", &self.observers)
            .field("particles", &self.particles.len())
            .field("pointer", &self.pointer)
            .finish()
    }
}
