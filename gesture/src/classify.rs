//! Streaming circle detection over a trailing sequence of points.
//!
//! The test is deliberately cheap so it can run on every frame: take the
//! centroid of the points, measure each point's distance to it, and accept when
//! those distances are nearly equal. A hand-drawn loop has a small relative
//! spread of radii; a line, an open arc or a scribble does not.

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;

use serde::Serialize;

use crate::consts::{DEFAULT_MAX_RADIUS_VARIATION, DEFAULT_MIN_CIRCLE_POINTS};
use crate::geometry::Point;

/// A detected circle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Roundness thresholds for [`CircleClassifier::classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleClassifier {
    /// Minimum number of points before a circle can be reported.
    pub min_points: usize,
    /// Acceptance threshold on `std / mean` of distances to the centroid.
    pub max_variation: f64,
}

impl Default for CircleClassifier {
    fn default() -> Self {
        Self { min_points: DEFAULT_MIN_CIRCLE_POINTS, max_variation: DEFAULT_MAX_RADIUS_VARIATION }
    }
}

impl CircleClassifier {
    /// Decide whether `points` trace a circle.
    ///
    /// Returns `None` for too few points, for a degenerate set where every
    /// point coincides, and for anything not round enough. Pure: the result
    /// depends only on the multiset of points.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn classify<'a, I>(&self, points: I) -> Option<Circle>
    where
        I: IntoIterator<Item = &'a Point>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();
        let count = points.clone().count();
        if count < self.min_points.max(1) {
            return None;
        }
        let n = count as f64;

        let (sum_x, sum_y) = points
            .clone()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        let center = Point::new(sum_x / n, sum_y / n);

        let distances: Vec<f64> = points.map(|p| p.distance(center)).collect();
        let radius = distances.iter().sum::<f64>() / n;
        if radius <= 0.0 || !radius.is_finite() {
            return None;
        }

        let variance = distances.iter().map(|d| (d - radius).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        (std_dev / radius < self.max_variation).then_some(Circle { center, radius })
    }
}

/// Classify with the default thresholds.
#[must_use]
pub fn classify(points: &[Point]) -> Option<Circle> {
    CircleClassifier::default().classify(points)
}
