//! Hand tracker seam and the script-backed tracker used for replay.

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tracker_test;

use gesture::driver::TrackerError;
use gesture::input::TrackerOutput;

use crate::script::Sample;

/// The camera frame handed to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub seq: u64,
    /// Capture time in milliseconds since the run started.
    pub t_ms: f64,
}

/// Fingertip detector. Implementations run on a worker task, so they must be
/// shareable across threads.
pub trait HandTracker: Send + Sync + 'static {
    /// Detect the index fingertip in one frame.
    ///
    /// # Errors
    ///
    /// Any inference failure. The caller treats it as a dropped frame.
    fn detect(&self, frame: CameraFrame) -> Result<TrackerOutput, TrackerError>;
}

/// Answers with whatever a recorded stream held at the frame's capture time.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTracker {
    samples: Vec<Sample>,
}

impl ScriptedTracker {
    /// `samples` must be sorted by time, as [`crate::script::Script`] keeps them.
    #[must_use]
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Latest sample at or before `t_ms`; `NoHand` before the first one.
    #[must_use]
    pub fn sample_at(&self, t_ms: f64) -> TrackerOutput {
        let idx = self.samples.partition_point(|s| s.t_ms <= t_ms);
        match idx.checked_sub(1) {
            Some(i) => self.samples[i].output,
            None => TrackerOutput::NoHand,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl HandTracker for ScriptedTracker {
    fn detect(&self, frame: CameraFrame) -> Result<TrackerOutput, TrackerError> {
        Ok(self.sample_at(frame.t_ms))
    }
}
