//! Short-lived spark particles.
//!
//! Particles are spawned in bursts at a point, fall under constant gravity and
//! fade out over their time-to-live. The system is advanced by elapsed time;
//! the caller clamps that time so a stalled frame cannot blow up the
//! integration.

#[cfg(test)]
#[path = "particles_test.rs"]
mod particles_test;

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::consts::{
    DEFAULT_BURST_COUNT, DEFAULT_GRAVITY, DEFAULT_MAX_PARTICLES, DEFAULT_POP_IMPULSE, SPARK_HUE_DEG,
    SPARK_HUE_JITTER_DEG, SPARK_LIGHTNESS_JITTER_PCT, SPARK_LIGHTNESS_PCT,
};
use crate::geometry::Point;

/// Spawn and physics parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    /// Particles per burst.
    pub burst_count: usize,
    /// Live particles are capped here; spawns beyond it are dropped.
    pub max_particles: usize,
    /// Initial speed range, units per second.
    pub speed_min: f64,
    pub speed_max: f64,
    /// Added to every particle's initial vertical velocity (negative is up).
    pub pop_impulse: f64,
    /// Sprite size range in canvas pixels.
    pub size_min: f64,
    pub size_max: f64,
    /// Time-to-live range in seconds.
    pub ttl_min: f64,
    pub ttl_max: f64,
    /// Downward acceleration, units per second squared.
    pub gravity: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            burst_count: DEFAULT_BURST_COUNT,
            max_particles: DEFAULT_MAX_PARTICLES,
            speed_min: 60.0,
            speed_max: 120.0,
            pop_impulse: DEFAULT_POP_IMPULSE,
            size_min: 1.5,
            size_max: 5.0,
            ttl_min: 0.25,
            ttl_max: 0.6,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

/// HSL color; hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// CSS `hsla()` string; `alpha` is clamped to `[0, 1]`.
    #[must_use]
    pub fn css(&self, alpha: f64) -> String {
        format!(
            "hsla({:.0}, {:.0}%, {:.0}%, {:.3})",
            self.hue.rem_euclid(360.0),
            self.saturation,
            self.lightness,
            alpha.clamp(0.0, 1.0)
        )
    }
}

/// A single spark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    pub position: Point,
    /// Horizontal velocity, units per second.
    pub vx: f64,
    /// Vertical velocity, units per second (positive is down).
    pub vy: f64,
    pub size: f64,
    /// Total lifetime in seconds.
    pub ttl: f64,
    /// Seconds left before removal.
    pub remaining_life: f64,
    pub color: Hsl,
}

impl Particle {
    /// Render opacity: remaining fraction of life, clamped to `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        if self.ttl > 0.0 { (self.remaining_life / self.ttl).clamp(0.0, 1.0) } else { 0.0 }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.remaining_life > 0.0
    }

    /// One explicit Euler step: gravity into velocity, velocity into position.
    fn step(&mut self, dt: f64, gravity: f64) {
        self.vy += gravity * dt;
        self.position.x += self.vx * dt;
        self.position.y += self.vy * dt;
        self.remaining_life -= dt;
    }
}

/// Bounded, unordered set of live particles.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    config: ParticleConfig,
    rng: StdRng,
}

impl ParticleSystem {
    /// Create an empty system seeded from the thread RNG.
    #[must_use]
    pub fn new(config: ParticleConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create an empty system with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn with_seed(config: ParticleConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ParticleConfig, rng: StdRng) -> Self {
        let reserve = config.max_particles.min(DEFAULT_MAX_PARTICLES);
        Self { particles: Vec::with_capacity(reserve), config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Spawn a burst of the configured size at `origin`.
    pub fn spawn_default_burst(&mut self, origin: Point) -> usize {
        self.spawn_burst(origin, self.config.burst_count)
    }

    /// Spawn up to `count` particles at `origin`, returning how many were added.
    ///
    /// Every particle draws its own direction, speed, size, lifetime and color.
    pub fn spawn_burst(&mut self, origin: Point, count: usize) -> usize {
        let room = self.config.max_particles.saturating_sub(self.particles.len());
        let count = count.min(room);
        for _ in 0..count {
            let particle = self.sample(origin);
            self.particles.push(particle);
        }
        count
    }

    fn sample(&mut self, origin: Point) -> Particle {
        let cfg = self.config;
        let angle = uniform(&mut self.rng, 0.0, TAU);
        let speed = uniform(&mut self.rng, cfg.speed_min, cfg.speed_max);
        let ttl = uniform(&mut self.rng, cfg.ttl_min, cfg.ttl_max);
        Particle {
            position: origin,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed + cfg.pop_impulse,
            size: uniform(&mut self.rng, cfg.size_min, cfg.size_max),
            ttl,
            remaining_life: ttl,
            color: Hsl {
                hue: SPARK_HUE_DEG + uniform(&mut self.rng, -SPARK_HUE_JITTER_DEG, SPARK_HUE_JITTER_DEG),
                saturation: 100.0,
                lightness: SPARK_LIGHTNESS_PCT
                    + uniform(&mut self.rng, -SPARK_LIGHTNESS_JITTER_PCT, SPARK_LIGHTNESS_JITTER_PCT),
            },
        }
    }

    /// Integrate every particle by `dt` seconds and drop the expired ones.
    pub fn advance(&mut self, dt: f64) {
        let gravity = self.config.gravity;
        for p in &mut self.particles {
            p.step(dt, gravity);
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(ParticleConfig::default())
    }
}

/// Uniform sample in `[lo, hi)`; degenerate ranges return `lo`.
fn uniform(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.random::<f64>()
}
