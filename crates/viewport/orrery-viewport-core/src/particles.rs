//! Short-lived decorative particles (selection sparks, activity bursts).

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds left to live.
    pub life: f32,
    pub max_life: f32,
    /// Fraction of velocity shed per second.
    pub drag: f32,
    pub gravity: Vec2,
}

impl Particle {
    /// Opacity from remaining life, in `[0, 1]`.
    #[inline]
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    fn step(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.velocity += self.gravity * dt;
        self.velocity *= (-self.drag * dt).exp();
        self.life -= dt;
    }
}

/// Parameters for one [`ParticleSystem::burst`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub count: usize,
    /// Central emission angle (radians, 0 = +x).
    pub direction: f32,
    /// Half-angle around `direction`; `PI` emits in every direction.
    pub spread: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub life_min: f32,
    pub life_max: f32,
    pub drag: f32,
    pub gravity: Vec2,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            count: 24,
            direction: 0.0,
            spread: std::f32::consts::PI,
            speed_min: 40.0,
            speed_max: 120.0,
            life_min: 0.4,
            life_max: 0.9,
            drag: 1.5,
            gravity: Vec2::ZERO,
        }
    }
}

impl EmitterConfig {
    pub fn validate(&self) -> Result<(), ViewportError> {
        let range_ok = |lo: f32, hi: f32| lo.is_finite() && hi.is_finite() && lo <= hi;
        let invalid = |reason: &str| {
            Err(ViewportError::InvalidEmitter {
                reason: reason.to_string(),
            })
        };
        if !range_ok(self.speed_min, self.speed_max) || self.speed_min < 0.0 {
            return invalid("speed range must satisfy 0 <= min <= max");
        }
        if !range_ok(self.life_min, self.life_max) || self.life_min <= 0.0 {
            return invalid("life range must satisfy 0 < min <= max");
        }
        if !(self.spread.is_finite() && self.spread >= 0.0 && self.direction.is_finite()) {
            return invalid("direction and spread must be finite, spread >= 0");
        }
        if !(self.drag.is_finite() && self.drag >= 0.0 && self.gravity.is_finite()) {
            return invalid("drag must be >= 0 and gravity finite");
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
    rng: StdRng,
}

impl ParticleSystem {
    /// Seeded so a given sequence of bursts is reproducible.
    pub fn new(max_particles: usize, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(1024)),
            max_particles,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn up to `config.count` particles at `origin`, limited by the
    /// remaining headroom. Returns how many were spawned.
    pub fn burst(&mut self, origin: Vec2, config: &EmitterConfig) -> Result<usize, ViewportError> {
        config.validate()?;
        if !origin.is_finite() {
            return Err(ViewportError::InvalidEmitter {
                reason: "origin must be finite".to_string(),
            });
        }
        let headroom = self.max_particles.saturating_sub(self.particles.len());
        let to_spawn = config.count.min(headroom);
        if to_spawn < config.count {
            log::debug!(
                "particle cap {} reached, spawning {to_spawn} of {}",
                self.max_particles,
                config.count
            );
        }

        for _ in 0..to_spawn {
            let angle = config.direction + self.rng.gen_range(-config.spread..=config.spread);
            let speed = self.rng.gen_range(config.speed_min..=config.speed_max);
            let life = self.rng.gen_range(config.life_min..=config.life_max);
            self.particles.push(Particle {
                position: origin,
                velocity: Vec2::from_angle(angle) * speed,
                life,
                max_life: life,
                drag: config.drag,
                gravity: config.gravity,
            });
        }
        Ok(to_spawn)
    }

    /// Advance every particle by `dt` seconds and drop the expired ones.
    /// Returns the live count. Non-positive or non-finite `dt` is a no-op.
    pub fn update(&mut self, dt: f32) -> usize {
        if dt.is_finite() && dt > 0.0 {
            self.particles.retain_mut(|p| {
                p.step(dt);
                p.is_alive()
            });
        }
        self.particles.len()
    }
}
