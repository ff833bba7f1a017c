//! Registry of named tweens sharing one frame loop.
//!
//! The host owns the real frame source (a `requestAnimationFrame` shim, a
//! winit redraw loop, a test harness) and plugs it in through [`FrameLoop`].
//! The scheduler only asks for it to be started when the first animation is
//! registered and stopped once the registry drains. Each frame the host calls
//! [`Scheduler::tick`] (or [`Scheduler::tick_at`] with an explicit time).

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use indexmap::IndexMap;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AnimationError;
use crate::spring::Spring;
use crate::state::AnimationState;
use crate::time::{AnimationTime, Clock, MonotonicClock};
use crate::tween::{Animation, AnimationConfig, TickOutcome};
use crate::value::AnimatableValue;

/// Hook into the host's per-frame callback.
pub trait FrameLoop {
    /// Begin delivering frames (the host then calls `tick` every frame).
    fn start(&mut self);
    /// Stop delivering frames.
    fn stop(&mut self);
}

/// Frame loop that does nothing; the host ticks manually.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFrameLoop;

impl FrameLoop for NullFrameLoop {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

/// Summary of one scheduler tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Clock reading used for the tick.
    pub now_ms: f64,
    /// Animations advanced this tick (including the ones that completed).
    pub updated: usize,
    /// Names that reached their end and were removed.
    pub completed: Vec<String>,
    /// Names dropped because a callback failed or panicked.
    pub failed: Vec<String>,
    /// Entries left in the registry afterwards.
    pub active: usize,
}

pub struct Scheduler {
    registry: IndexMap<String, Animation>,
    clock: Box<dyn Clock>,
    frame_loop: Box<dyn FrameLoop>,
    loop_running: bool,
    config: Config,
}

impl Scheduler {
    /// Scheduler on a monotonic clock with no frame loop attached.
    pub fn new(config: Config) -> Self {
        Self {
            registry: IndexMap::new(),
            clock: Box::new(MonotonicClock::new()),
            frame_loop: Box::new(NullFrameLoop),
            loop_running: false,
            config,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_frame_loop(mut self, frame_loop: impl FrameLoop + 'static) -> Self {
        self.frame_loop = Box::new(frame_loop);
        self
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn now(&self) -> AnimationTime {
        self.clock.now()
    }

    /// Build, start and register an animation under `name`.
    ///
    /// An existing animation with the same name is stopped (its completion
    /// callback never runs) and replaced; the new one ticks last.
    pub fn animate(
        &mut self,
        name: impl Into<String>,
        config: AnimationConfig,
    ) -> Result<(), AnimationError> {
        let name = name.into();
        let mut animation = Animation::new(name.clone(), config, self.config.default_easing)?;
        animation.start(self.clock.now())?;

        if let Some(mut previous) = self.registry.shift_remove(&name) {
            debug!("replacing animation '{name}'");
            let _ = previous.stop();
        }
        self.registry.insert(name, animation);
        self.ensure_loop();
        Ok(())
    }

    /// A spring from `value` toward `target` using the configured parameters.
    /// Springs are stepped by the caller, not registered here.
    pub fn spring(&self, value: f32, target: f32) -> Result<Spring, AnimationError> {
        Spring::new(value, target, self.config.spring)
    }

        /// Advance every running animation to the clock's current reading.
    pub fn tick(&mut self) -> TickReport {
        let now = self.clock.now();
        self.tick_at(now)
    }

    /// Advance every running animation to `now`.
    ///
    /// Finished animations are removed after their completion callback ran.
    /// An animation whose callback fails (or panics, when `catch_panics` is
    /// set) is logged and removed; the rest of the tick carries on.
    pub fn tick_at(&mut self, now: AnimationTime) -> TickReport {
        let catch_panics = self.config.catch_panics;
        let mut report = TickReport {
            now_ms: now.as_millis(),
            ..TickReport::default()
        };

        self.registry.retain(|name, animation| {
            match animation.state() {
                AnimationState::Running => {}
                AnimationState::Created | AnimationState::Paused => return true,
                AnimationState::Completed | AnimationState::Stopped => return false,
            }

            let outcome = if catch_panics {
                panic::catch_unwind(AssertUnwindSafe(|| animation.update(now))).unwrap_or_else(
                    |payload| {
                        Err(AnimationError::Callback {
                            name: name.clone(),
                            reason: format!("panicked: {}", panic_message(payload.as_ref())),
                        })
                    },
                )
            } else {
                animation.update(now)
            };

            match outcome {
                Ok(TickOutcome::Pending) => {
                    report.updated += 1;
                    true
                }
                Ok(TickOutcome::Finished) => {
                    report.updated += 1;
                    report.completed.push(name.clone());
                    false
                }
                Err(err) => {
                    warn!("dropping animation '{name}': {err}");
                    report.failed.push(name.clone());
                    false
                }
            }
        });

        report.active = self.registry.len();
        trace!(
            "tick @{:.3}ms: {} updated, {} completed, {} failed, {} active",
            report.now_ms,
            report.updated,
            report.completed.len(),
            report.failed.len(),
            report.active
        );
        self.halt_if_idle();
        report
    }

    /// Stop and remove `name` without firing its completion callback.
    /// Returns whether anything was registered under that name.
    pub fn stop(&mut self, name: &str) -> bool {
        let Some(mut animation) = self.registry.shift_remove(name) else {
            return false;
        };
        let _ = animation.stop();
        self.halt_if_idle();
        true
    }

    pub fn pause(&mut self, name: &str) -> Result<(), AnimationError> {
        let now = self.clock.now();
        self.get_mut(name)?.pause(now)
    }

    pub fn resume(&mut self, name: &str) -> Result<(), AnimationError> {
        let now = self.clock.now();
        self.get_mut(name)?.resume(now)
    }

    /// Stop and remove everything.
    pub fn stop_all(&mut self) {
        for (_, mut animation) in self.registry.drain(..) {
            let _ = animation.stop();
        }
        self.halt_if_idle();
    }

    /// Pause every running animation; returns how many were paused.
    pub fn pause_all(&mut self) -> usize {
        let now = self.clock.now();
        self.registry
            .values_mut()
            .filter_map(|animation| animation.pause(now).ok())
            .count()
    }

    /// Resume every paused animation; returns how many were resumed.
    pub fn resume_all(&mut self) -> usize {
        let now = self.clock.now();
        self.registry
            .values_mut()
            .filter_map(|animation| animation.resume(now).ok())
            .count()
    }

    /// Drop every animation (no callbacks fire) and halt the frame loop.
    pub fn destroy(&mut self) {
        self.registry.clear();
        if self.loop_running {
            self.loop_running = false;
            self.frame_loop.stop();
            debug!("frame loop stopped (destroyed)");
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    #[inline]
    pub fn is_loop_running(&self) -> bool {
        self.loop_running
    }

    /// Registered names in tick order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    pub fn state(&self, name: &str) -> Option<AnimationState> {
        self.registry.get(name).map(Animation::state)
    }

    /// Pre-easing progress of `name` at the clock's current reading.
    pub fn progress(&self, name: &str) -> Option<f32> {
        let now = self.clock.now();
        self.registry.get(name).map(|a| a.progress_at(now))
    }

    /// Interpolated value of `name` at the clock's current reading.
    pub fn value(&self, name: &str) -> Option<AnimatableValue> {
        let now = self.clock.now();
        self.registry.get(name).map(|a| a.value_at(now))
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Animation, AnimationError> {
        self.registry
            .get_mut(name)
            .ok_or_else(|| AnimationError::AnimationNotFound {
                name: name.to_string(),
            })
    }

    fn ensure_loop(&mut self) {
        if !self.loop_running {
            self.loop_running = true;
            self.frame_loop.start();
            debug!("frame loop started");
        }
    }

    fn halt_if_idle(&mut self) {
        if self.loop_running && self.registry.is_empty() {
            self.loop_running = false;
            self.frame_loop.stop();
            debug!("frame loop stopped (registry empty)");
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("animations", &self.registry.keys().collect::<Vec<_>>())
            .field("loop_running", &self.loop_running)
            .field("config", &self.config)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    fn scheduler() -> (Scheduler, ManualClock) {
        let clock = ManualClock::new();
        (Scheduler::default().with_clock(clock.clone()), clock)
    }

    #[test]
    fn finished_animations_leave_the_registry() {
        let (mut s, clock) = scheduler();
        s.animate("a", AnimationConfig::new(0.0, 1.0, 100.0)).unwrap();
        s.animate("b", AnimationConfig::new(0.0, 1.0, 300.0)).unwrap();
        clock.advance_millis(150.0);
        let report = s.tick();
        assert_eq!(report.updated, 2);
        assert_eq!(report.completed, vec!["a".to_string()]);
        assert_eq!(report.active, 1);
        assert!(s.contains("b"));
    }

    #[test]
    fn unknown_names_are_reported() {
        let (mut s, _clock) = scheduler();
        assert!(matches!(
            s.pause("ghost"),
            Err(AnimationError::AnimationNotFound { .. })
        ));
        assert!(!s.stop("ghost"));
    }

    #[test]
    fn construction_errors_leave_registry_untouched() {
        let (mut s, _clock) = scheduler();
        s.animate("a", AnimationConfig::new(0.0, 1.0, 100.0)).unwrap();
        assert!(s.animate("a", AnimationConfig::new(0.0, 1.0, 0.0)).is_err());
        assert_eq!(s.len(), 1);
        assert_eq!(s.state("a"), Some(AnimationState::Running));
    }

    #[test]
    fn replacement_moves_to_the_end() {
        let (mut s, _clock) = scheduler();
        for name in ["a", "b", "c"] {
            s.animate(name, AnimationConfig::new(0.0, 1.0, 100.0)).unwrap();
        }
        s.animate("a", AnimationConfig::new(0.0, 1.0, 100.0)).unwrap();
        assert_eq!(s.names().collect::<Vec<_>>(), vec!["b", "c", "a"]);
    }

    #[test]
    fn tick_report_serializes() {
        let report = TickReport {
            now_ms: 16.0,
            updated: 1,
            completed: vec!["camera".into()],
            failed: vec![],
            active: 0,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["completed"][0], "camera");
    }
}
