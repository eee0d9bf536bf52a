//! Screen-space geometry: points, the viewport, and the cover transform.
//!
//! The tracker reports fingertips in normalized source-media space. The camera
//! feed is drawn letterboxed onto the canvas with a uniform "cover" scale and a
//! centered crop, so a fingertip has to go through the same mapping before its
//! geometry means anything on screen.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Uniform scale and centering offset that makes source media cover the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub draw_width: f64,
    pub draw_height: f64,
}

impl CoverTransform {
    /// Compute the cover transform for `source` media drawn onto `canvas`.
    ///
    /// Scale is the larger of the two axis ratios, so one axis fits exactly and
    /// the other overflows and is cropped equally on both sides.
    #[must_use]
    pub fn new(source_w: f64, source_h: f64, canvas_w: f64, canvas_h: f64) -> Self {
        let scale = (canvas_w / source_w).max(canvas_h / source_h);
        let draw_width = source_w * scale;
        let draw_height = source_h * scale;
        Self {
            scale,
            offset_x: (canvas_w - draw_width) / 2.0,
            offset_y: (canvas_h - draw_height) / 2.0,
            draw_width,
            draw_height,
        }
    }

    /// Map a point in source pixels to canvas pixels.
    #[must_use]
    pub fn apply(&self, source: Point) -> Point {
        Point {
            x: source.x * self.scale + self.offset_x,
            y: source.y * self.scale + self.offset_y,
        }
    }
}

/// Canvas and source media dimensions.
///
/// Every dimension is at least 1 so the transform never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub source_width: f64,
    pub source_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { canvas_width: 1280.0, canvas_height: 720.0, source_width: 1280.0, source_height: 720.0 }
    }
}

impl Viewport {
    /// Set the canvas size from layout dimensions: floored, at least 1.
    pub fn resize_canvas(&mut self, width: f64, height: f64) {
        self.canvas_width = layout_dim(width);
        self.canvas_height = layout_dim(height);
    }

    /// Set the source media size. Unknown (zero or invalid) sizes become 1.
    pub fn resize_source(&mut self, width: f64, height: f64) {
        self.source_width = media_dim(width);
        self.source_height = media_dim(height);
    }

    /// The cover transform for the current dimensions.
    #[must_use]
    pub fn cover(&self) -> CoverTransform {
        CoverTransform::new(self.source_width, self.source_height, self.canvas_width, self.canvas_height)
    }

    /// Map a normalized `[0,1]²` tracker coordinate to canvas pixels.
    ///
    /// With `mirror_x` the horizontal axis is flipped first, matching a
    /// selfie-style mirrored camera feed.
    #[must_use]
    pub fn map_normalized(&self, nx: f64, ny: f64, mirror_x: bool) -> Point {
        let nx = if mirror_x { 1.0 - nx } else { nx };
        let source = Point::new(nx * self.source_width, ny * self.source_height);
        self.cover().apply(source)
    }

    /// The shorter canvas side.
    #[must_use]
    pub fn min_side(&self) -> f64 {
        self.canvas_width.min(self.canvas_height)
    }

    /// The canvas center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.canvas_width * 0.5, self.canvas_height * 0.5)
    }
}

fn layout_dim(raw: f64) -> f64 {
    if raw.is_finite() { raw.floor().max(1.0) } else { 1.0 }
}

fn media_dim(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 { raw } else { 1.0 }
}
