//! Duration-based tweens between two [`AnimatableValue`] trees.

use std::fmt;

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::interp::{interpolate, progress_for};
use crate::state::AnimationState;
use crate::time::AnimationTime;
use crate::value::AnimatableValue;

/// Receives the interpolated value on every tick.
pub type UpdateFn = Box<dyn FnMut(&AnimatableValue) -> anyhow::Result<()>>;
/// Runs once when the tween reaches its end.
pub type CompleteFn = Box<dyn FnOnce() -> anyhow::Result<()>>;

/// Result of advancing a tween by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running (or paused); keep ticking.
    Pending,
    /// Completed or stopped; drop it.
    Finished,
}

/// Everything needed to build an [`Animation`].
pub struct AnimationConfig {
    pub from: AnimatableValue,
    pub to: AnimatableValue,
    pub duration_ms: f64,
    /// `None` uses the scheduler's configured default.
    pub easing: Option<Easing>,
    on_update: Option<UpdateFn>,
    on_complete: Option<CompleteFn>,
}

impl AnimationConfig {
    pub fn new(
        from: impl Into<AnimatableValue>,
        to: impl Into<AnimatableValue>,
        duration_ms: f64,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            duration_ms,
            easing: None,
            on_update: None,
            on_complete: None,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&AnimatableValue) -> anyhow::Result<()> + 'static,
    {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<()> + 'static,
    {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for AnimationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationConfig")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("on_update", &self.on_update.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// A single running tween.
///
/// Elapsed time is `now - origin` while running. Pausing stores the elapsed
/// span; resuming moves the origin so the span continues from where it
/// stopped, whatever happened to the clock in between.
pub struct Animation {
    name: String,
    from: AnimatableValue,
    to: AnimatableValue,
    duration: AnimationTime,
    easing: Easing,
    on_update: Option<UpdateFn>,
    on_complete: Option<CompleteFn>,
    state: AnimationState,
    origin: AnimationTime,
    frozen_elapsed: AnimationTime,
    value: AnimatableValue,
}

impl Animation {
    /// Validate `config` and build a tween in the `Created` state.
    pub fn new(
        name: impl Into<String>,
        config: AnimationConfig,
        default_easing: Easing,
    ) -> Result<Self, AnimationError> {
        let AnimationConfig {
            from,
            to,
            duration_ms,
            easing,
            on_update,
            on_complete,
        } = config;

        if !(duration_ms.is_finite() && duration_ms > 0.0) {
            return Err(AnimationError::InvalidDuration { duration_ms });
        }
        let duration = AnimationTime::from_millis(duration_ms)?;
        if duration.is_zero() {
            return Err(AnimationError::InvalidDuration { duration_ms });
        }
        from.check_compatible(&to)?;

        Ok(Self {
            name: name.into(),
            value: from.clone(),
            from,
            to,
            duration,
            easing: easing.unwrap_or(default_easing),
            on_update,
            on_complete,
            state: AnimationState::Created,
            origin: AnimationTime::zero(),
            frozen_elapsed: AnimationTime::zero(),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[inline]
    pub fn duration(&self) -> AnimationTime {
        self.duration
    }

    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Last value handed to the update callback (`from` before the first tick).
    #[inline]
    pub fn value(&self) -> &AnimatableValue {
        &self.value
    }

    pub fn start(&mut self, now: AnimationTime) -> Result<(), AnimationError> {
        self.transition("running", AnimationState::can_start)?;
        self.origin = now;
        self.frozen_elapsed = AnimationTime::zero();
        self.state = AnimationState::Running;
        Ok(())
    }

    pub fn pause(&mut self, now: AnimationTime) -> Result<(), AnimationError> {
        self.transition("paused", AnimationState::can_pause)?;
        self.frozen_elapsed = now.saturating_since(self.origin);
        self.state = AnimationState::Paused;
        Ok(())
    }

    pub fn resume(&mut self, now: AnimationTime) -> Result<(), AnimationError> {
        self.transition("running", AnimationState::can_resume)?;
        self.origin = now - self.frozen_elapsed;
        self.state = AnimationState::Running;
        Ok(())
    }

    /// Cancel without firing the completion callback.
    pub fn stop(&mut self) -> Result<(), AnimationError> {
        self.transition("stopped", AnimationState::can_stop)?;
        self.state = AnimationState::Stopped;
        self.on_complete = None;
        Ok(())
    }

    /// Elapsed animation time as seen at `now`, honoring pauses.
    pub fn elapsed_at(&self, now: AnimationTime) -> AnimationTime {
        match self.state {
            AnimationState::Created => AnimationTime::zero(),
            AnimationState::Running => now.saturating_since(self.origin),
            AnimationState::Paused | AnimationState::Stopped => self.frozen_elapsed,
            AnimationState::Completed => self.duration,
        }
    }

    /// Pre-easing progress in `[0, 1]`.
    pub fn progress_at(&self, now: AnimationTime) -> f32 {
        progress_for(self.elapsed_at(now), self.duration)
    }

    /// Interpolated value at `now` without running any callback.
    pub fn value_at(&self, now: AnimationTime) -> AnimatableValue {
        self.value_for(self.progress_at(now))
    }

    /// Advance to `now`, feed the update callback and, at the end, the
    /// completion callback. Only a running tween does any work.
    pub fn update(&mut self, now: AnimationTime) -> Result<TickOutcome, AnimationError> {
        match self.state {
            AnimationState::Running => {}
            AnimationState::Created | AnimationState::Paused => return Ok(TickOutcome::Pending),
            AnimationState::Completed | AnimationState::Stopped => {
                return Ok(TickOutcome::Finished)
            }
        }

        let elapsed = now.saturating_since(self.origin);
        self.frozen_elapsed = elapsed;
        let progress = progress_for(elapsed, self.duration);
        let value = self.value_for(progress);

        if let Some(on_update) = self.on_update.as_mut() {
            if let Err(err) = on_update(&value) {
                self.state = AnimationState::Stopped;
                return Err(self.callback_error(err));
            }
        }
        self.value = value;

        if progress >= 1.0 {
            self.state = AnimationState::Completed;
            if let Some(on_complete) = self.on_complete.take() {
                on_complete().map_err(|err| self.callback_error(err))?;
            }
            return Ok(TickOutcome::Finished);
        }
        Ok(TickOutcome::Pending)
    }

    /// The final frame lands on `to` whatever the easing returns at 1.
    fn value_for(&self, progress: f32) -> AnimatableValue {
        let eased = if progress >= 1.0 {
            1.0
        } else {
            self.easing.apply(progress)
        };
        interpolate(&self.from, &self.to, eased)
    }

    fn transition(
        &self,
        requested: &str,
        allowed: fn(&AnimationState) -> bool,
    ) -> Result<(), AnimationError> {
        if allowed(&self.state) {
            Ok(())
        } else {
            Err(AnimationError::InvalidState {
                current_state: self.state.name().to_string(),
                requested_state: requested.to_string(),
            })
        }
    }

    fn callback_error(&self, err: anyhow::Error) -> AnimationError {
        AnimationError::Callback {
            name: self.name.clone(),
            reason: format!("{err:#}"),
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("duration_ms", &self.duration.as_millis())
            .field("easing", &self.easing)
            .field("value", &self.value)
            .finish()
    }
}
