//! Monotonic animation time and the clocks that produce it.
//!
//! Animations never read wall-clock time directly. The scheduler asks an
//! injected [`Clock`] for "now", so hosts that throttle or suspend their
//! frame loop cannot make elapsed time drift, and tests can step time by hand.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// A moment (or span) in animation time, stored as nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Default)]
pub struct AnimationTime(u64);

impl AnimationTime {
    /// Create animation time from nanoseconds
    #[inline]
    pub fn from_nanos(nanoseconds: u64) -> Self {
        Self(nanoseconds)
    }

    /// Create animation time from milliseconds
    #[inline]
    pub fn from_millis(milliseconds: f64) -> Result<Self, AnimationError> {
        if milliseconds < 0.0 || !milliseconds.is_finite() {
            return Err(AnimationError::InvalidTime { time: milliseconds });
        }
        Ok(Self((milliseconds * 1_000_000.0).round() as u64))
    }

    /// Create animation time from seconds
    #[inline]
    pub fn from_seconds(seconds: f64) -> Result<Self, AnimationError> {
        if seconds < 0.0 || !seconds.is_finite() {
            return Err(AnimationError::InvalidTime { time: seconds });
        }
        Ok(Self((seconds * 1_000_000_000.0).round() as u64))
    }

    /// Zero time
    #[inline]
    pub fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Get time in seconds
    #[inline]
    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Get time in milliseconds
    #[inline]
    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Get time in nanoseconds
    #[inline]
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Span between `earlier` and `self`; zero if `earlier` is in the future.
    #[inline]
    pub fn saturating_since(&self, earlier: AnimationTime) -> AnimationTime {
        AnimationTime(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add for AnimationTime {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::ops::AddAssign for AnimationTime {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::ops::Sub for AnimationTime {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl From<Duration> for AnimationTime {
    fn from(duration: Duration) -> Self {
        AnimationTime::from_nanos(duration.as_nanos() as u64)
    }
}

impl From<AnimationTime> for Duration {
    fn from(time: AnimationTime) -> Self {
        Duration::from_nanos(time.0)
    }
}

/// Source of monotonic "now" readings for the scheduler.
pub trait Clock {
    fn now(&self) -> AnimationTime;
}

/// Clock backed by [`Instant`], measured from its construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> AnimationTime {
        AnimationTime::from(self.origin.elapsed())
    }
}

/// Hand-driven clock. Clones share the same reading, so a host (or test)
/// can keep one handle while the scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute time.
    pub fn set(&self, time: AnimationTime) {
        self.nanos.set(time.as_nanos());
    }

    /// Move forward by `millis`; negative or non-finite input is ignored.
    pub fn advance_millis(&self, millis: f64) {
        if let Ok(step) = AnimationTime::from_millis(millis) {
            self.nanos.set(self.nanos.get().saturating_add(step.as_nanos()));
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> AnimationTime {
        AnimationTime::from_nanos(self.nanos.get())
    }
}
