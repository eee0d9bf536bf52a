//! Render-ready snapshot of a session.
//!
//! The renderer is a thin compositor: it draws the camera feed, clips the
//! portal video to the portal circle, strokes the trail and the ring, and
//! splats particles. It makes no decisions. Everything it needs, including
//! derived hints such as ring width and particle opacity, is computed here from
//! the model and handed over as plain owned data.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::Serialize;

use crate::geometry::{Point, Viewport};
use crate::particles::Particle;
use crate::session::{GestureSession, Phase, Portal};

/// Portal geometry plus ring render hints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortalView {
    pub center: Point,
    pub radius: f64,
    /// Ring stroke width in canvas pixels.
    pub ring_width: f64,
    /// Side of the square ring sprite.
    pub sprite_side: f64,
    /// Radius grew on the last tick.
    pub growing: bool,
}

impl PortalView {
    fn new(portal: Portal, growing: bool) -> Self {
        Self {
            center: portal.center,
            radius: portal.radius,
            ring_width: portal.ring_width(),
            sprite_side: portal.sprite_side(),
            growing,
        }
    }
}

/// One particle as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub position: Point,
    pub size: f64,
    pub opacity: f64,
    /// CSS color with the opacity folded in.
    pub color: String,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        let opacity = p.opacity();
        Self { position: p.position, size: p.size, opacity, color: p.color.css(opacity) }
    }
}

/// Immutable copy of everything the renderer draws for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    /// Trail points, oldest first.
    pub points: Vec<Point>,
    /// Fingertip marker position.
    pub last_point: Option<Point>,
    pub portal: Option<PortalView>,
    pub particles: Vec<ParticleView>,
    pub status: String,
    /// Name of the video shown through the portal.
    pub portal_source: Option<String>,
    pub viewport: Viewport,
}

impl Snapshot {
    /// Copy the render-relevant state out of `session`.
    #[must_use]
    pub fn capture(session: &GestureSession) -> Self {
        Self {
            phase: session.phase(),
            points: session.points().to_vec(),
            last_point: session.last_point(),
            portal: session.portal().map(|p| PortalView::new(p, session.is_growing())),
            particles: session.particles().particles().iter().map(ParticleView::from).collect(),
            status: session.status().to_string(),
            portal_source: session.portal_source().map(str::to_string),
            viewport: session.viewport(),
        }
    }

    /// Serialize as JSON for hosts that cross a language boundary.
    ///
    /// # Errors
    ///
    /// Returns the serializer error unchanged.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Whether the trail has enough points to stroke a line.
    #[must_use]
    pub fn has_trail(&self) -> bool {
        self.points.len() >= 2
    }
}
