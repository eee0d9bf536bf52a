//! Frame-driver plumbing: the clamped frame clock and the inference slot.
//!
//! The host runs one loop per animation frame. Each frame it asks the clock for
//! elapsed time, ticks the session, and, if the tracker is idle, issues one new
//! inference request. Tracker inference can take longer than a frame, so the
//! [`InferenceSlot`] allows at most one request in flight; frames that find it
//! busy skip inference but still render and tick. A result that arrives late
//! is still applied.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use tracing::trace;

/// The point source (camera) could not be started.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("point source unavailable: {0}")]
    Unavailable(String),
    #[error("point source I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One tracker inference failed.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("tracker inference failed: {0}")]
    Inference(String),
    #[error("tracker shut down before replying")]
    Closed,
}

/// Converts animation-frame timestamps into clamped elapsed seconds.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_secs: f64,
}

impl FrameClock {
    #[must_use]
    pub fn new(max_secs: f64) -> Self {
        Self { last_ms: None, max_secs: max_secs.max(0.0) }
    }

    /// Seconds since the previous tick, clamped to `[0, max_secs]`.
    ///
    /// The first tick returns 0. A timestamp that goes backwards also yields 0.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let elapsed = match self.last_ms {
            Some(last) => (now_ms - last) / 1000.0,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if elapsed.is_finite() { elapsed.clamp(0.0, self.max_secs) } else { 0.0 }
    }

    #[must_use]
    pub fn max_secs(&self) -> f64 {
        self.max_secs
    }
}

/// Proof that the holder owns the inference slot. Hand it back with
/// [`InferenceSlot::finish`] once the tracker replies.
#[derive(Debug, PartialEq, Eq)]
pub struct InferenceTicket {
    seq: u64,
}

impl InferenceTicket {
    /// Monotonic request number, starting at 0.
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Single-slot guard allowing at most one tracker request in flight.
#[derive(Debug, Default)]
pub struct InferenceSlot {
    in_flight: Option<u64>,
    next_seq: u64,
    skipped: u64,
}

impl InferenceSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for a new request, or `None` if one is still in flight.
    pub fn try_begin(&mut self) -> Option<InferenceTicket> {
        if let Some(seq) = self.in_flight {
            self.skipped += 1;
            trace!(in_flight = seq, "inference busy, skipping frame");
            return None;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight = Some(seq);
        Some(InferenceTicket { seq })
    }

    /// Release the slot. Returns `false` for a ticket that does not own it.
    pub fn finish(&mut self, ticket: InferenceTicket) -> bool {
        if self.in_flight == Some(ticket.seq) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Frames that skipped inference because the slot was busy.
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Requests issued so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next_seq
    }
}
