//! Replay scripts: a recorded fingertip stream plus user signals.
//!
//! FORMAT
//! ======
//! JSON lines, one event per line, `t` in milliseconds from the start:
//!
//! ```text
//! {"t": 0,   "signal": {"type": "portal_source_selected", "name": "nebula.mp4"}}
//! {"t": 33,  "hand": {"x": 0.51, "y": 0.42}}
//! {"t": 66,  "hand": null}
//! {"t": 900, "signal": {"type": "grow_pressed"}}
//! ```
//!
//! Every line carries either `signal` or `hand`; a bare `{"t": ..}` is an
//! error. Blank lines and lines starting with `#` are ignored. Events need not be in
//! order; they are sorted by time on load. A `hand` with missing or bad
//! coordinates is kept as-is so the session can reject it.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::f64::consts::TAU;
use std::path::Path;

use gesture::driver::SourceError;
use gesture::input::{Landmark, Signal, TrackerOutput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// A script line that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("script line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Deserialize)]
#[serde(untagged, deny_unknown_fields)]
enum Entry {
    Signal { t: f64, signal: Signal },
    Hand {
        t: f64,
        #[serde(deserialize_with = "nullable_landmark")]
        hand: Option<Landmark>,
    },
}

/// `hand` must be present; `null` is the explicit "no hand" sample.
fn nullable_landmark<'de, D>(deserializer: D) -> Result<Option<Landmark>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Landmark>::deserialize(deserializer)
}

/// What the tracker would have reported at `t_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t_ms: f64,
    pub output: TrackerOutput,
}

/// A user signal delivered at `t_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSignal {
    pub t_ms: f64,
    pub signal: Signal,
}

/// Parameters for a generated circle-drawing session.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticParams {
    /// Source media size in pixels; the circle is round in this space.
    pub source_width: f64,
    pub source_height: f64,
    /// Circle radius in source pixels.
    pub radius_px: f64,
    /// Uniform jitter applied to each sample, in source pixels.
    pub jitter_px: f64,
    /// Time for one full revolution.
    pub period_ms: f64,
    /// Tracker sample spacing.
    pub sample_ms: f64,
    pub seed: u64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            source_width: 1280.0,
            source_height: 720.0,
            radius_px: 150.0,
            jitter_px: 2.0,
            period_ms: 1500.0,
            sample_ms: 33.0,
            seed: 7,
        }
    }
}

/// Time-ordered tracker samples and signals.
#[derive(Debug, Clone, Default)]
pub struct Script {
    samples: Vec<Sample>,
    signals: Vec<TimedSignal>,
}

impl Script {
    /// Parse a JSON-lines script.
    ///
    /// # Errors
    ///
    /// Returns the first line that is not a valid event.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut script = Self::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let entry: Entry = serde_json::from_str(line).map_err(|source| ScriptError { line: idx + 1, source })?;
            match entry {
                Entry::Signal { t, signal } => script.signals.push(TimedSignal { t_ms: t, signal }),
                Entry::Hand { t, hand } => script.samples.push(Sample { t_ms: t, output: hand.into() }),
            }
        }
        script.sort();
        Ok(script)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// An unreadable or malformed file means there is no point source.
    pub async fn open(path: &Path) -> Result<Self, SourceError> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::parse(&text).map_err(|e| SourceError::Unavailable(e.to_string()))
    }

    /// Generate a hand entering, tracing ~1.2 turns of a circle around the
    /// source center, leaving, and then the user holding grow for one second.
    #[must_use]
    pub fn synthetic(params: SyntheticParams) -> Self {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut script = Self::default();
        let sample_ms = params.sample_ms.max(1.0);
        let enter_ms = 500.0;
        let draw_ms = params.period_ms * 1.2;
        let leave_ms = enter_ms + draw_ms;

        let mut t = 0.0;
        let mut i = 0_u32;
        while t < enter_ms {
            script.samples.push(Sample { t_ms: t, output: TrackerOutput::NoHand });
            i += 1;
            t = f64::from(i) * sample_ms;
        }
        while t < leave_ms {
            let angle = TAU * (t - enter_ms) / params.period_ms;
            let jx = rng.random_range(-1.0..=1.0) * params.jitter_px;
            let jy = rng.random_range(-1.0..=1.0) * params.jitter_px;
            let sx = params.source_width * 0.5 + params.radius_px * angle.cos() + jx;
            let sy = params.source_height * 0.5 + params.radius_px * angle.sin() + jy;
            let landmark = Landmark::new(sx / params.source_width, sy / params.source_height);
            script.samples.push(Sample { t_ms: t, output: TrackerOutput::Fingertip(landmark) });
            i += 1;
            t = f64::from(i) * sample_ms;
        }
        script.samples.push(Sample { t_ms: leave_ms, output: TrackerOutput::NoHand });

        script.signals.push(TimedSignal { t_ms: leave_ms + 200.0, signal: Signal::GrowPressed });
        script.signals.push(TimedSignal { t_ms: leave_ms + 1200.0, signal: Signal::GrowReleased });
        script.sort();
        script
    }

    fn sort(&mut self) {
        self.samples.sort_by(|a, b| a.t_ms.total_cmp(&b.t_ms));
        self.signals.sort_by(|a, b| a.t_ms.total_cmp(&b.t_ms));
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn signals(&self) -> &[TimedSignal] {
        &self.signals
    }

    /// Split into tracker samples and signals.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Sample>, Vec<TimedSignal>) {
        (self.samples, self.signals)
    }

    /// Time of the last event, or 0 for an empty script.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        let last_sample = self.samples.last().map_or(0.0, |s| s.t_ms);
        let last_signal = self.signals.last().map_or(0.0, |s| s.t_ms);
        last_sample.max(last_signal)
    }
}
