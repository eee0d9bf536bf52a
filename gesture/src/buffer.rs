//! Bounded FIFO of recent fingertip positions.

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;

use std::collections::VecDeque;

use crate::consts::PREALLOC_POINTS;
use crate::geometry::Point;

/// Trailing fingertip points in insertion order, oldest first.
///
/// Never holds more than `capacity` points; pushing onto a full buffer evicts
/// the oldest point.
#[derive(Debug, Clone)]
pub struct PointBuffer {
    points: VecDeque<Point>,
    capacity: usize,
}

impl PointBuffer {
    /// Create an empty buffer. A zero capacity is raised to 1; storage is
    /// reserved up front only for the first [`PREALLOC_POINTS`] points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { points: VecDeque::with_capacity(capacity.min(PREALLOC_POINTS)), capacity }
    }

    /// Append `point`, returning the evicted oldest point if the buffer was full.
    pub fn push(&mut self, point: Point) -> Option<Point> {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recently pushed point.
    #[must_use]
    pub fn newest(&self) -> Option<Point> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> + Clone {
        self.points.iter()
    }

    /// Copy the points out, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Point> {
        self.points.iter().copied().collect()
    }
}

impl Default for PointBuffer {
    fn default() -> Self {
        Self::with_capacity(crate::consts::DEFAULT_MAX_POINTS)
    }
}
