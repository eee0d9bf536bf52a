//! The gesture session: turns a stream of fingertip samples into a portal.
//!
//! A session is the per-camera-stream state machine. It owns the trailing
//! point buffer, the portal once one is locked, the particle effects and the
//! held user controls. The host calls three entry points:
//!
//! - [`GestureSession::on_tracker`] once per completed tracker inference,
//! - [`GestureSession::apply_signal`] for each discrete user/host event,
//! - [`GestureSession::tick`] once per rendered frame with the clamped
//!   elapsed time.
//!
//! Each returns the [`Action`]s the host may care about. The render-ready state
//! is read with [`GestureSession::snapshot`]. Nothing here touches a platform
//! object, and nothing here fails: bad input is logged and treated as a lost
//! hand.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::Serialize;
use tracing::{debug, info};

use crate::buffer::PointBuffer;
use crate::classify::{Circle, CircleClassifier};
use crate::config::PortalConfig;
use crate::consts::{
    DEFAULT_GROWTH_CLAMP_FRACTION, DEFAULT_GROWTH_PER_SEC, DEFAULT_MAX_POINTS, LOCK_BURST_MULTIPLIER,
    RING_SPRITE_SCALE, RING_WIDTH_FRACTION, RING_WIDTH_MAX_PX, RING_WIDTH_MIN_PX,
};
use crate::geometry::{Point, Viewport};
use crate::input::{Controls, Signal, TrackerOutput};
use crate::particles::ParticleSystem;
use crate::snapshot::Snapshot;

pub const STATUS_READY: &str = "Draw a circle with your index finger";
pub const STATUS_NO_HAND: &str = "Hand not detected";
pub const STATUS_LOCKED: &str = "Portal created!";
pub const STATUS_RESET: &str = "Portal reset";
pub const STATUS_UNAVAILABLE: &str = "Webcam access denied or unavailable.";

/// Session tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Point buffer capacity.
    pub max_points: usize,
    /// Flip the tracker's horizontal axis (selfie view).
    pub mirror_x: bool,
    /// Portal radius growth while grow is held, units per second.
    pub growth_per_sec: f64,
    /// Growth stops at this fraction of the shorter canvas side.
    pub growth_clamp_fraction: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
            mirror_x: true,
            growth_per_sec: DEFAULT_GROWTH_PER_SEC,
            growth_clamp_fraction: DEFAULT_GROWTH_CLAMP_FRACTION,
        }
    }
}

/// A locked portal in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Portal {
    pub center: Point,
    pub radius: f64,
}

impl From<Circle> for Portal {
    fn from(circle: Circle) -> Self {
        Self { center: circle.center, radius: circle.radius }
    }
}

impl Portal {
    /// Width of the glowing ring stroke.
    #[must_use]
    pub fn ring_width(&self) -> f64 {
        (self.radius * RING_WIDTH_FRACTION).clamp(RING_WIDTH_MIN_PX, RING_WIDTH_MAX_PX)
    }

    /// Side of the square ring sprite drawn centered on the portal.
    #[must_use]
    pub fn sprite_side(&self) -> f64 {
        self.radius * RING_SPRITE_SCALE
    }
}

/// Coarse session phase, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No points, no portal.
    Idle,
    /// Points accumulating, no portal yet.
    Tracking,
    /// A portal is fixed; detection is off until reset.
    Locked,
}

/// Internal state. The portal exists exactly when the session is locked.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SessionState {
    Idle,
    Tracking,
    Locked {
        portal: Portal,
        /// Whether growth was applied on the most recent tick.
        growing: bool,
    },
}

/// Events returned to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The advisory status line changed.
    StatusChanged(String),
    /// A circle was recognized and the portal is now fixed.
    PortalLocked(Portal),
    /// The portal grew to a new radius this tick.
    PortalGrew { radius: f64 },
    /// The portal and trail were cleared.
    PortalCleared,
    /// The alternate video behind the portal changed.
    PortalSourceChanged(String),
}

/// Per-stream gesture state machine.
pub struct GestureSession {
    config: PortalConfig,
    classifier: CircleClassifier,
    buffer: PointBuffer,
    state: SessionState,
    last_point: Option<Point>,
    controls: Controls,
    viewport: Viewport,
    particles: ParticleSystem,
    status: String,
    portal_source: Option<String>,
}

impl GestureSession {
    /// Create an idle session. The config is repaired with
    /// [`PortalConfig::validated`] first.
    #[must_use]
    pub fn new(config: PortalConfig) -> Self {
        let config = config.validated();
        Self::with_particles(config, ParticleSystem::new(config.particles))
    }

    /// Like [`GestureSession::new`] with a fixed particle seed.
    #[must_use]
    pub fn with_seed(config: PortalConfig, seed: u64) -> Self {
        let config = config.validated();
        Self::with_particles(config, ParticleSystem::with_seed(config.particles, seed))
    }

    fn with_particles(config: PortalConfig, particles: ParticleSystem) -> Self {
        Self {
            classifier: config.classifier,
            buffer: PointBuffer::with_capacity(config.session.max_points),
            state: SessionState::Idle,
            last_point: None,
            controls: Controls::default(),
            viewport: Viewport::default(),
            particles,
            status: String::new(),
            portal_source: None,
            config,
        }
    }

    // --- Lifecycle ---

    /// The point source is live; prompt the user to draw.
    pub fn start(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.set_status(STATUS_READY, &mut actions);
        actions
    }

    /// The point source could not be opened. The session stays idle.
    pub fn source_unavailable(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.set_status(STATUS_UNAVAILABLE, &mut actions);
        actions
    }

    // --- Tracker input ---

    /// Fold one tracker result into the session.
    ///
    /// A landmark that fails validation counts as a lost hand for this frame.
    pub fn on_tracker(&mut self, output: TrackerOutput) -> Vec<Action> {
        match output {
            TrackerOutput::Fingertip(landmark) => match landmark.validate() {
                Ok((nx, ny)) => {
                    let point = self.viewport.map_normalized(nx, ny, self.config.session.mirror_x);
                    self.on_point(point)
                }
                Err(e) => {
                    debug!(error = %e, "rejected tracker sample");
                    self.on_hand_lost()
                }
            },
            TrackerOutput::NoHand => self.on_hand_lost(),
        }
    }

    /// Accept a fingertip already in canvas pixels.
    ///
    /// While unlocked every point is classified together with the trail before
    /// it; the first accepted circle locks the portal. Once locked, points
    /// still extend the trail but are never classified again.
    pub fn on_point(&mut self, point: Point) -> Vec<Action> {
        if !point.x.is_finite() || !point.y.is_finite() {
            debug!(x = point.x, y = point.y, "rejected non-finite point");
            return self.on_hand_lost();
        }

        let mut actions = Vec::new();
        self.buffer.push(point);
        self.last_point = Some(point);
        self.particles.spawn_default_burst(point);

        if matches!(self.state, SessionState::Locked { .. }) {
            return actions;
        }
        self.state = SessionState::Tracking;

        if let Some(circle) = self.classifier.classify(self.buffer.iter()) {
            let portal = Portal::from(circle);
            self.state = SessionState::Locked { portal, growing: false };
            let burst = self.particles.config().burst_count.saturating_mul(LOCK_BURST_MULTIPLIER);
            self.particles.spawn_burst(portal.center, burst);
            info!(
                x = portal.center.x,
                y = portal.center.y,
                radius = portal.radius,
                points = self.buffer.len(),
                "portal locked"
            );
            actions.push(Action::PortalLocked(portal));
            self.set_status(STATUS_LOCKED, &mut actions);
        }
        actions
    }

    /// No usable fingertip this frame.
    ///
    /// Unlocked sessions drop their trail and go idle. A locked portal is
    /// independent of tracking, so nothing changes.
    pub fn on_hand_lost(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if matches!(self.state, SessionState::Locked { .. }) {
            return actions;
        }
        self.buffer.clear();
        self.last_point = None;
        self.state = SessionState::Idle;
        self.set_status(STATUS_NO_HAND, &mut actions);
        actions
    }

    // --- Signals ---

    /// Fold a discrete user or host event into the session.
    pub fn apply_signal(&mut self, signal: Signal) -> Vec<Action> {
        let mut actions = Vec::new();
        match signal {
            Signal::GrowPressed => self.controls.grow_held = true,
            Signal::GrowReleased => self.controls.grow_held = false,
            Signal::Reset => self.reset(&mut actions),
            Signal::Resize { width, height } => self.viewport.resize_canvas(width, height),
            Signal::SourceResized { width, height } => self.viewport.resize_source(width, height),
            Signal::PortalSourceSelected { name } => {
                info!(source = %name, "portal source selected");
                self.portal_source = Some(name.clone());
                actions.push(Action::PortalSourceChanged(name));
            }
        }
        actions
    }

    fn reset(&mut self, actions: &mut Vec<Action>) {
        let had_portal = matches!(self.state, SessionState::Locked { .. });
        self.state = SessionState::Idle;
        self.buffer.clear();
        self.last_point = None;
        info!(had_portal, "session reset");
        actions.push(Action::PortalCleared);
        self.set_status(STATUS_RESET, actions);
    }

    // --- Frame tick ---

    /// Advance time-based state by `dt` seconds.
    ///
    /// `dt` is expected to be clamped by the frame clock already; negative or
    /// non-finite values are treated as zero. While locked with grow held, the
    /// portal radius increases toward the clamp and never shrinks.
    pub fn tick(&mut self, dt: f64) -> Vec<Action> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut actions = Vec::new();

        let max_radius = self.max_radius();
        let rate = self.config.session.growth_per_sec;
        let grow_held = self.controls.grow_held;
        if let SessionState::Locked { portal, growing } = &mut self.state {
            *growing = grow_held;
            if grow_held {
                let grown = (portal.radius + rate * dt).min(max_radius).max(portal.radius);
                if grown > portal.radius {
                    portal.radius = grown;
                    actions.push(Action::PortalGrew { radius: grown });
                }
            }
        }

        self.particles.advance(dt);
        actions
    }

    /// Largest radius growth may reach on the current canvas.
    #[must_use]
    pub fn max_radius(&self) -> f64 {
        self.viewport.min_side() * self.config.session.growth_clamp_fraction
    }

    fn set_status(&mut self, text: &str, actions: &mut Vec<Action>) {
        if self.status == text {
            return;
        }
        info!(status = text, "status changed");
        self.status = text.to_string();
        actions.push(Action::StatusChanged(self.status.clone()));
    }

    // --- Queries ---

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::Idle => Phase::Idle,
            SessionState::Tracking => Phase::Tracking,
            SessionState::Locked { .. } => Phase::Locked,
        }
    }

    /// The portal, present exactly when locked.
    #[must_use]
    pub fn portal(&self) -> Option<Portal> {
        match self.state {
            SessionState::Locked { portal, .. } => Some(portal),
            SessionState::Idle | SessionState::Tracking => None,
        }
    }

    /// Whether the last tick grew the portal.
    #[must_use]
    pub fn is_growing(&self) -> bool {
        matches!(self.state, SessionState::Locked { growing: true, .. })
    }

    #[must_use]
    pub fn points(&self) -> &PointBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }

    #[must_use]
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        self.controls
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn portal_source(&self) -> Option<&str> {
        self.portal_source.as_deref()
    }

    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Immutable render-ready copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::new(PortalConfig::default())
    }
}
