//! Shared numeric constants for the gesture crate.

// ── Point buffer ────────────────────────────────────────────────

/// Default number of fingertip points kept in the trailing buffer.
pub const DEFAULT_MAX_POINTS: usize = 60;

/// Largest trail a configuration may ask for.
pub const MAX_POINTS_CEILING: usize = 4096;

/// Points reserved when a buffer is created; larger trails grow on demand.
pub const PREALLOC_POINTS: usize = 64;

// ── Circle classifier ───────────────────────────────────────────

/// Fewer points than this is never enough evidence for a circle.
pub const DEFAULT_MIN_CIRCLE_POINTS: usize = 30;

/// Maximum coefficient of variation (std / mean) of distances to the centroid.
pub const DEFAULT_MAX_RADIUS_VARIATION: f64 = 0.2;

// ── Portal growth ───────────────────────────────────────────────

/// Radius growth while grow is held, in canvas units per second.
pub const DEFAULT_GROWTH_PER_SEC: f64 = 180.0;

/// Growth stops at this fraction of `min(canvas_width, canvas_height)`.
pub const DEFAULT_GROWTH_CLAMP_FRACTION: f64 = 0.6;

// ── Frame clock ─────────────────────────────────────────────────

/// Largest elapsed time handed to physics in one tick, in seconds.
pub const DEFAULT_MAX_FRAME_SECS: f64 = 0.05;

// ── Particles ───────────────────────────────────────────────────

/// Particles per fingertip burst.
pub const DEFAULT_BURST_COUNT: usize = 8;

/// The lock burst is this many regular bursts.
pub const LOCK_BURST_MULTIPLIER: usize = 4;

/// Upper bound on live particles.
pub const DEFAULT_MAX_PARTICLES: usize = 512;

/// Largest particle cap a configuration may ask for.
pub const MAX_PARTICLES_CEILING: usize = 16_384;

/// Downward acceleration in canvas units per second squared.
pub const DEFAULT_GRAVITY: f64 = 220.0;

/// Upward impulse added to every spawned particle's vertical velocity.
pub const DEFAULT_POP_IMPULSE: f64 = -40.0;

/// Base hue of particle sparks, in degrees (portal orange).
pub const SPARK_HUE_DEG: f64 = 36.0;

/// Hue jitter applied either side of [`SPARK_HUE_DEG`].
pub const SPARK_HUE_JITTER_DEG: f64 = 12.0;

/// Base lightness of particle sparks, in percent.
pub const SPARK_LIGHTNESS_PCT: f64 = 62.0;

/// Lightness jitter applied either side of [`SPARK_LIGHTNESS_PCT`].
pub const SPARK_LIGHTNESS_JITTER_PCT: f64 = 10.0;

// ── Render hints ────────────────────────────────────────────────

/// Ring stroke width as a fraction of the portal radius.
pub const RING_WIDTH_FRACTION: f64 = 0.06;

/// Ring stroke width bounds in canvas pixels.
pub const RING_WIDTH_MIN_PX: f64 = 4.0;
pub const RING_WIDTH_MAX_PX: f64 = 8.0;

/// Ring sprite side length as a multiple of the portal radius.
pub const RING_SPRITE_SCALE: f64 = 2.2;
