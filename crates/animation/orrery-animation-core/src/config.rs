//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::spring::SpringConfig;

/// Tunables for a [`crate::Scheduler`]. Every field has a default, so a
/// partial JSON document is enough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Easing used when an `AnimationConfig` leaves it unset.
    pub default_easing: Easing,

    /// Catch panics raised inside callbacks and treat them like callback
    /// errors instead of unwinding through the frame loop.
    pub catch_panics: bool,

    /// Parameters for springs built from this config.
    pub spring: SpringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_easing: Easing::EaseOutCubic,
            catch_panics: true,
            spring: SpringConfig::default(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, AnimationError> {
        let config: Self = serde_json::from_str(json)?;
        config.spring.validate()?;
        Ok(config)
    }
}
