//! Portal tunables, with defaults and environment overrides.
//!
//! Every knob has a compiled-in default. `PortalConfig::from_env` lets a
//! deployment override any of them without a rebuild; a variable that is
//! absent or does not parse keeps the default. Loading never fails.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::classify::CircleClassifier;
use crate::consts::{DEFAULT_MAX_FRAME_SECS, MAX_PARTICLES_CEILING, MAX_POINTS_CEILING};
use crate::particles::ParticleConfig;
use crate::session::SessionConfig;

/// All tunables for one portal session and its frame driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalConfig {
    pub session: SessionConfig,
    pub classifier: CircleClassifier,
    pub particles: ParticleConfig,
    /// Frame clock clamp on elapsed time, in seconds.
    pub max_frame_secs: f64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            classifier: CircleClassifier::default(),
            particles: ParticleConfig::default(),
            max_frame_secs: DEFAULT_MAX_FRAME_SECS,
        }
    }
}

impl PortalConfig {
    /// Build config from environment variables on top of the defaults.
    ///
    /// - `PORTAL_MAX_POINTS`: trail buffer capacity (60)
    /// - `PORTAL_MIRROR_X`: `true`/`false`, `1`/`0` (true)
    /// - `PORTAL_GROWTH_RATE`: units/second (180)
    /// - `PORTAL_GROWTH_CLAMP`: fraction of the shorter canvas side (0.6)
    /// - `PORTAL_MAX_FRAME_SECS`: elapsed-time clamp (0.05)
    /// - `PORTAL_MIN_POINTS`: classifier minimum (30)
    /// - `PORTAL_MAX_VARIATION`: classifier roundness threshold (0.2)
    /// - `PORTAL_BURST_COUNT`: particles per burst (8)
    /// - `PORTAL_MAX_PARTICLES`: live particle cap (512)
    /// - `PORTAL_GRAVITY`: units/second² (220)
    #[must_use]
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            session: SessionConfig {
                max_points: env_parse("PORTAL_MAX_POINTS", d.session.max_points),
                mirror_x: env_flag("PORTAL_MIRROR_X", d.session.mirror_x),
                growth_per_sec: env_parse("PORTAL_GROWTH_RATE", d.session.growth_per_sec),
                growth_clamp_fraction: env_parse("PORTAL_GROWTH_CLAMP", d.session.growth_clamp_fraction),
            },
            classifier: CircleClassifier {
                min_points: env_parse("PORTAL_MIN_POINTS", d.classifier.min_points),
                max_variation: env_parse("PORTAL_MAX_VARIATION", d.classifier.max_variation),
            },
            particles: ParticleConfig {
                burst_count: env_parse("PORTAL_BURST_COUNT", d.particles.burst_count),
                max_particles: env_parse("PORTAL_MAX_PARTICLES", d.particles.max_particles),
                gravity: env_parse("PORTAL_GRAVITY", d.particles.gravity),
                ..d.particles
            },
            max_frame_secs: env_parse("PORTAL_MAX_FRAME_SECS", d.max_frame_secs),
        }
        .validated()
    }

    /// Replace values that would break the session's invariants with defaults.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let d = Self::default();
        self.session.max_points = self.session.max_points.clamp(1, MAX_POINTS_CEILING);
        self.session.growth_per_sec = non_negative_or(self.session.growth_per_sec, d.session.growth_per_sec);
        self.session.growth_clamp_fraction =
            positive_or(self.session.growth_clamp_fraction, d.session.growth_clamp_fraction);
        self.classifier.max_variation = positive_or(self.classifier.max_variation, d.classifier.max_variation);
        self.max_frame_secs = positive_or(self.max_frame_secs, d.max_frame_secs);

        let p = &mut self.particles;
        p.max_particles = p.max_particles.min(MAX_PARTICLES_CEILING);
        p.gravity = finite_or(p.gravity, d.particles.gravity);
        p.pop_impulse = finite_or(p.pop_impulse, d.particles.pop_impulse);
        (p.speed_min, p.speed_max) = ordered_or(p.speed_min, p.speed_max, (d.particles.speed_min, d.particles.speed_max));
        (p.size_min, p.size_max) = ordered_or(p.size_min, p.size_max, (d.particles.size_min, d.particles.size_max));
        (p.ttl_min, p.ttl_max) = ordered_or(p.ttl_min, p.ttl_max, (d.particles.ttl_min, d.particles.ttl_max));
        if p.ttl_min <= 0.0 {
            (p.ttl_min, p.ttl_max) = (d.particles.ttl_min, d.particles.ttl_max);
        }
        self
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { default }
}

fn non_negative_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 { value } else { default }
}

/// A finite `(min, max)` pair in order; swapped if reversed.
fn ordered_or(min: f64, max: f64, default: (f64, f64)) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        return default;
    }
    if min <= max { (min, max) } else { (max, min) }
}
