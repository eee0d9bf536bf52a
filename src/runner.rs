//! Frame loop: ticks the session at a fixed rate and keeps one tracker
//! request in flight.
//!
//! Each frame delivers due signals, picks up a finished inference if there is
//! one, issues a new request when the slot is free, and then ticks the
//! session by the clamped frame time. A result that arrives after its frame is
//! applied on whichever frame first sees it.

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;

use std::sync::Arc;
use std::time::Duration;

use gesture::driver::{FrameClock, InferenceSlot, InferenceTicket, TrackerError};
use gesture::input::{Signal, TrackerOutput};
use gesture::session::{Action, GestureSession, Phase};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::script::TimedSignal;
use crate::tracker::{CameraFrame, HandTracker};

/// Highest frame rate the loop will run at.
pub const MAX_FPS: u32 = 1000;

type Reply = Result<TrackerOutput, TrackerError>;

/// How the loop is paced and when it stops.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub fps: u32,
    /// Simulated time the tracker spends on each frame.
    pub latency: Duration,
    /// Stop once this much time has elapsed.
    pub until_ms: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { fps: 60, latency: Duration::from_millis(25), until_ms: 1000.0 }
    }
}

impl RunOptions {
    /// Time between frames, with `fps` held to `1..=MAX_FPS`.
    fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.clamp(1, MAX_FPS)))
    }
}

/// Counters from one run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunReport {
    pub frames: u64,
    /// Tracker requests issued.
    pub inferences: u64,
    /// Tracker results folded into the session.
    pub applied: u64,
    /// Frames that found a request still in flight.
    pub skipped: u64,
    /// Requests that failed or never replied.
    pub failures: u64,
    /// Elapsed time of the frame on which the portal locked.
    pub locked_at_ms: Option<f64>,
}

struct Pending {
    ticket: InferenceTicket,
    rx: oneshot::Receiver<Reply>,
}

/// Drive `session` until `opts.until_ms`.
///
/// `signals` must be sorted by time. The session should already be started.
pub async fn run<T: HandTracker>(
    session: &mut GestureSession,
    tracker: Arc<T>,
    signals: Vec<TimedSignal>,
    opts: &RunOptions,
) -> RunReport {
    let start = Instant::now();
    let mut interval = tokio::time::interval(opts.frame_period());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut clock = FrameClock::new(session.config().max_frame_secs);
    let mut slot = InferenceSlot::new();
    let mut pending: Option<Pending> = None;
    let mut signals = signals.into_iter().peekable();
    let mut report = RunReport::default();

    info!(fps = opts.fps, latency_ms = opts.latency.as_millis(), until_ms = opts.until_ms, "frame loop started");

    loop {
        interval.tick().await;
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;
        let dt = clock.tick(now_ms);
        report.frames += 1;

        while let Some(next) = signals.next_if(|s| s.t_ms <= now_ms) {
            log_actions(&session.apply_signal(next.signal));
        }

        if let Some(Pending { ticket, mut rx }) = pending.take() {
            match rx.try_recv() {
                Ok(reply) => {
                    slot.finish(ticket);
                    apply_reply(session, reply, &mut report);
                }
                Err(TryRecvError::Empty) => pending = Some(Pending { ticket, rx }),
                Err(TryRecvError::Closed) => {
                    warn!(seq = ticket.seq(), "tracker task ended without a reply");
                    slot.finish(ticket);
                    report.failures += 1;
                }
            }
        }

        if let Some(ticket) = slot.try_begin() {
            let frame = CameraFrame { seq: ticket.seq(), t_ms: now_ms };
            pending = Some(Pending { ticket, rx: spawn_inference(Arc::clone(&tracker), frame, opts.latency) });
            report.inferences += 1;
        }

        log_actions(&session.tick(dt));

        if report.locked_at_ms.is_none() && session.phase() == Phase::Locked {
            report.locked_at_ms = Some(now_ms);
        }
        if now_ms >= opts.until_ms {
            break;
        }
    }

    report.skipped = slot.skipped();
    info!(
        frames = report.frames,
        inferences = report.inferences,
        applied = report.applied,
        skipped = report.skipped,
        failures = report.failures,
        "frame loop finished"
    );
    report
}

/// Point the session at the canvas and source sizes and name the portal media.
pub fn prepare(session: &mut GestureSession, canvas: (f64, f64), source: (f64, f64), portal_source: Option<String>) {
    log_actions(&session.apply_signal(Signal::Resize { width: canvas.0, height: canvas.1 }));
    log_actions(&session.apply_signal(Signal::SourceResized { width: source.0, height: source.1 }));
    if let Some(name) = portal_source {
        log_actions(&session.apply_signal(Signal::PortalSourceSelected { name }));
    }
}

fn spawn_inference<T: HandTracker>(tracker: Arc<T>, frame: CameraFrame, latency: Duration) -> oneshot::Receiver<Reply> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        tokio::time::sleep(latency).await;
        let reply = tracker.detect(frame);
        if tx.send(reply).is_err() {
            debug!(seq = frame.seq, "inference reply dropped");
        }
    });
    rx
}

fn apply_reply(session: &mut GestureSession, reply: Reply, report: &mut RunReport) {
    match reply {
        Ok(output) => {
            report.applied += 1;
            log_actions(&session.on_tracker(output));
        }
        Err(e) => {
            warn!(error = %e, "tracker inference failed");
            report.failures += 1;
        }
    }
}

fn log_actions(actions: &[Action]) {
    for action in actions {
        debug!(?action, "session action");
    }
}
