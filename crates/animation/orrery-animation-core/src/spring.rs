//! Damped spring stepped by caller-supplied time deltas.
//!
//! `a = (-stiffness * (x - target) - damping * v) / mass`, integrated with
//! semi-implicit Euler (velocity first, then position). There is no
//! duration: the spring runs until both displacement and velocity drop under
//! `rest_threshold`, then snaps onto the target.
//!
//! State is integrated in `f64` so large coordinates still come to rest.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Physical parameters of a spring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Settle once |velocity| and |value - target| are both below this.
    pub rest_threshold: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 170.0,
            damping: 26.0,
            mass: 1.0,
            rest_threshold: 0.001,
        }
    }
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            ..Self::default()
        }
    }

    /// Slow, soft approach.
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible overshoot and settle.
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Quick with little overshoot.
    pub fn stiff() -> Self {
        Self::new(210.0, 20.0, 1.0)
    }

    pub fn with_rest_threshold(mut self, threshold: f32) -> Self {
        self.rest_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), AnimationError> {
        let invalid = |reason: String| Err(AnimationError::InvalidSpring { reason });
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return invalid(format!("mass must be > 0, got {}", self.mass));
        }
        if !(self.stiffness.is_finite() && self.stiffness >= 0.0) {
            return invalid(format!("stiffness must be >= 0, got {}", self.stiffness));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return invalid(format!("damping must be >= 0, got {}", self.damping));
        }
        if !(self.rest_threshold.is_finite() && self.rest_threshold > 0.0) {
            return invalid(format!(
                "rest threshold must be > 0, got {}",
                self.rest_threshold
            ));
        }
        Ok(())
    }
}

/// Whether the caller needs to keep stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringStep {
    Moving,
    Settled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
    settled: bool,
}

impl Spring {
    pub fn new(value: f32, target: f32, config: SpringConfig) -> Result<Self, AnimationError> {
        config.validate()?;
        if !value.is_finite() || !target.is_finite() {
            return Err(AnimationError::InvalidSpring {
                reason: format!("non-finite value/target ({value} -> {target})"),
            });
        }
        Ok(Self {
            value: value.into(),
            velocity: 0.0,
            target: target.into(),
            config,
            settled: false,
        })
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value as f32
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity as f32
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target as f32
    }

    #[inline]
    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Re-target mid-flight. Velocity is kept so motion stays continuous.
    pub fn set_target(&mut self, target: f32) {
        if !target.is_finite() {
            log::warn!("ignoring non-finite spring target {target}");
            return;
        }
        let target = f64::from(target);
        if target != self.target {
            self.target = target;
            self.settled = false;
        }
    }

    /// Kick the spring with an impulse (e.g. a flick gesture).
    pub fn add_velocity(&mut self, dv: f32) {
        if dv.is_finite() && dv != 0.0 {
            self.velocity += f64::from(dv);
            self.settled = false;
        }
    }

    /// Jump to `value` at rest, with target and value equal.
    pub fn snap_to(&mut self, value: f32) {
        if value.is_finite() {
            self.value = value.into();
            self.target = value.into();
            self.velocity = 0.0;
            self.settled = true;
        }
    }

    /// Advance by `dt` seconds. Non-positive or non-finite `dt` is a no-op.
    pub fn update(&mut self, dt: f32) -> SpringStep {
        if self.settled {
            return SpringStep::Settled;
        }
        if !(dt.is_finite() && dt > 0.0) {
            return SpringStep::Moving;
        }

        let dt = f64::from(dt);
        let stiffness = f64::from(self.config.stiffness);
        let damping = f64::from(self.config.damping);
        let mass = f64::from(self.config.mass);
        let rest_threshold = f64::from(self.config.rest_threshold);
        let force = -stiffness * (self.value - self.target);
        let damping_force = -damping * self.velocity;
        let acceleration = (force + damping_force) / mass;

        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;

        if self.velocity.abs() < rest_threshold && (self.value - self.target).abs() < rest_threshold
        {
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
            return SpringStep::Settled;
        }
        SpringStep::Moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_rest(spring: &mut Spring, dt: f32, max_steps: usize) -> Option<usize> {
        (1..=max_steps).find(|_| spring.update(dt) == SpringStep::Settled)
    }

    #[test]
    fn converges_exactly_onto_target() {
        let mut spring = Spring::new(0.0, 100.0, SpringConfig::default()).unwrap();
        let steps = run_to_rest(&mut spring, 1.0 / 60.0, 10_000);
        assert!(steps.is_some());
        assert_eq!(spring.value(), 100.0);
        assert_eq!(spring.velocity(), 0.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn settles_on_large_coordinates() {
        for target in [1e3f32, 1e4, 1e6, -2.5e5] {
            let mut spring = Spring::new(0.0, target, SpringConfig::default()).unwrap();
            let steps = run_to_rest(&mut spring, 1.0 / 60.0, 10_000);
            assert!(steps.is_some(), "never settled on {target}");
            assert_eq!(spring.value(), target);
            assert_eq!(spring.velocity(), 0.0);
        }
    }

    #[test]
    fn wobbly_overshoots_before_settling() {
        let mut spring = Spring::new(0.0, 1.0, SpringConfig::wobbly()).unwrap();
        let mut peak = 0.0f32;
        for _ in 0..10_000 {
            let step = spring.update(1.0 / 120.0);
            peak = peak.max(spring.value());
            if step == SpringStep::Settled {
                break;
            }
        }
        assert!(peak > 1.0);
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn retarget_keeps_velocity() {
        let mut spring = Spring::new(0.0, 10.0, SpringConfig::stiff()).unwrap();
        for _ in 0..5 {
            spring.update(1.0 / 60.0);
        }
        let v = spring.velocity();
        assert!(v > 0.0);
        spring.set_target(-10.0);
        assert_eq!(spring.velocity(), v);
        assert!(!spring.is_settled());
        run_to_rest(&mut spring, 1.0 / 60.0, 10_000).unwrap();
        assert_eq!(spring.value(), -10.0);
    }

    #[test]
    fn ignores_degenerate_dt() {
        let mut spring = Spring::new(0.0, 1.0, SpringConfig::default()).unwrap();
        assert_eq!(spring.update(0.0), SpringStep::Moving);
        assert_eq!(spring.update(-1.0), SpringStep::Moving);
        assert_eq!(spring.update(f32::NAN), SpringStep::Moving);
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(Spring::new(0.0, 1.0, SpringConfig::new(100.0, 10.0, 0.0)).is_err());
        assert!(Spring::new(0.0, 1.0, SpringConfig::new(-1.0, 10.0, 1.0)).is_err());
        assert!(Spring::new(0.0, f32::INFINITY, SpringConfig::default()).is_err());
        assert!(SpringConfig::default().with_rest_threshold(0.0).validate().is_err());
    }

    #[test]
    fn config_fields_default_when_missing() {
        let cfg: SpringConfig = serde_json::from_str(r#"{"stiffness": 300}"#).unwrap();
        assert_eq!(cfg.stiffness, 300.0);
        assert_eq!(cfg.mass, 1.0);
    }
}
