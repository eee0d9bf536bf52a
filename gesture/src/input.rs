//! Input model: tracker samples, user signals, and held controls.
//!
//! Everything the outside world can tell a session arrives through the types
//! in this module. `TrackerOutput` is what the hand tracker produced for one
//! frame. `Signal` is a discrete, named user or host event (key presses, file
//! selection, layout changes) that the session folds into its state.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

/// Which coordinate of a landmark is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Why a raw landmark was not accepted as a fingertip.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LandmarkError {
    #[error("landmark is missing its {0} coordinate")]
    Missing(Axis),
    #[error("landmark {axis} coordinate is not finite")]
    NonFinite { axis: Axis },
    #[error("landmark {axis} coordinate {value} is outside [0, 1]")]
    OutOfRange { axis: Axis, value: f64 },
}

/// A fingertip landmark as reported by the tracker, in normalized `[0,1]²`.
///
/// Coordinates are optional because tracker output is not trusted; see
/// [`Landmark::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl Landmark {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y) }
    }

    /// Check the landmark and return its normalized coordinates.
    ///
    /// # Errors
    ///
    /// Returns a [`LandmarkError`] when a coordinate is missing, not finite,
    /// or outside the unit interval.
    pub fn validate(&self) -> Result<(f64, f64), LandmarkError> {
        let x = check_coord(self.x, Axis::X)?;
        let y = check_coord(self.y, Axis::Y)?;
        Ok((x, y))
    }
}

fn check_coord(raw: Option<f64>, axis: Axis) -> Result<f64, LandmarkError> {
    let value = raw.ok_or(LandmarkError::Missing(axis))?;
    if !value.is_finite() {
        return Err(LandmarkError::NonFinite { axis });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(LandmarkError::OutOfRange { axis, value });
    }
    Ok(value)
}

/// What the tracker reported for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerOutput {
    /// A hand was found; this is its index fingertip.
    Fingertip(Landmark),
    /// No hand in this frame.
    NoHand,
}

impl From<Option<Landmark>> for TrackerOutput {
    fn from(value: Option<Landmark>) -> Self {
        value.map_or(Self::NoHand, Self::Fingertip)
    }
}

/// Discrete events delivered to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    /// The grow control went down.
    GrowPressed,
    /// The grow control was released.
    GrowReleased,
    /// Cancel: drop the portal and start over.
    Reset,
    /// The canvas was laid out at a new size, in CSS pixels.
    Resize { width: f64, height: f64 },
    /// The camera feed reported its native size.
    SourceResized { width: f64, height: f64 },
    /// The user picked a video to show through the portal.
    PortalSourceSelected { name: String },
}

impl Signal {
    /// Map a keyboard key to a signal.
    ///
    /// `key` is the key code as reported by the host (e.g. `"Space"`).
    /// Space drives growth while held; Escape resets on press.
    #[must_use]
    pub fn from_key(key: &str, pressed: bool) -> Option<Self> {
        match (key, pressed) {
            ("Space", true) => Some(Self::GrowPressed),
            ("Space", false) => Some(Self::GrowReleased),
            ("Escape", true) => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Momentary controls held by the user, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    /// Grow control is held down.
    pub grow_held: bool,
}
