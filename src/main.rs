//! Headless portal driver.
//!
//! Replays a fingertip script (or a generated circle) through a
//! [`GestureSession`] at a fixed frame rate with simulated tracker latency,
//! then prints the final render snapshot as JSON.

mod runner;
mod script;
mod tracker;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use gesture::config::PortalConfig;
use gesture::driver::SourceError;
use gesture::session::GestureSession;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::runner::RunOptions;
use crate::script::{Script, SyntheticParams};
use crate::tracker::ScriptedTracker;

/// Frames to keep running after the last scripted event.
const TAIL_MS: f64 = 250.0;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("snapshot encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Replay fingertip input through the portal gesture session")]
struct Cli {
    /// JSON-lines fingertip script. A synthetic circle is drawn when omitted.
    #[arg(long, env = "PORTAL_SCRIPT")]
    script: Option<PathBuf>,

    #[arg(long, env = "PORTAL_FPS", default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=i64::from(runner::MAX_FPS)))]
    fps: u32,

    /// Simulated tracker inference time per frame.
    #[arg(long, env = "PORTAL_LATENCY_MS", default_value_t = 25)]
    latency_ms: u64,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,

    #[arg(long, default_value_t = 1280.0)]
    source_width: f64,

    #[arg(long, default_value_t = 720.0)]
    source_height: f64,

    /// Seed for particles and the synthetic trace.
    #[arg(long)]
    seed: Option<u64>,

    /// Media shown inside the portal.
    #[arg(long, env = "PORTAL_SOURCE")]
    portal_source: Option<String>,

    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = PortalConfig::from_env();
    let mut session = match cli.seed {
        Some(seed) => GestureSession::with_seed(config, seed),
        None => GestureSession::new(config),
    };
    runner::prepare(
        &mut session,
        (cli.width, cli.height),
        (cli.source_width, cli.source_height),
        cli.portal_source.clone(),
    );

    let script = match load_script(&cli).await {
        Ok(script) => script,
        Err(e) => {
            error!(error = %e, "point source unavailable");
            session.source_unavailable();
            return print_snapshot(&session, cli.pretty);
        }
    };

    session.start();
    let opts = RunOptions {
        fps: cli.fps,
        latency: Duration::from_millis(cli.latency_ms),
        until_ms: script.duration_ms() + TAIL_MS,
    };
    info!(samples = script.samples().len(), signals = script.signals().len(), until_ms = opts.until_ms, "replaying script");
    let (samples, signals) = script.into_parts();
    let tracker = ScriptedTracker::new(samples);
    if tracker.is_empty() {
        warn!("script has no tracker samples; the hand will never be seen");
    }

    let report = runner::run(&mut session, Arc::new(tracker), signals, &opts).await;
    match report.locked_at_ms {
        Some(t_ms) => info!(t_ms, "portal locked during replay"),
        None => info!("replay ended without a portal"),
    }

    print_snapshot(&session, cli.pretty)
}

async fn load_script(cli: &Cli) -> Result<Script, SourceError> {
    match &cli.script {
        Some(path) => {
            info!(path = %path.display(), "loading script");
            Script::open(path).await
        }
        None => Ok(Script::synthetic(SyntheticParams {
            source_width: cli.source_width.max(1.0),
            source_height: cli.source_height.max(1.0),
            seed: cli.seed.unwrap_or(SyntheticParams::default().seed),
            ..SyntheticParams::default()
        })),
    }
}

fn print_snapshot(session: &GestureSession, pretty: bool) -> Result<(), CliError> {
    let snapshot = session.snapshot();
    let json = if pretty { serde_json::to_string_pretty(&snapshot)? } else { snapshot.to_json()? };
    println!("{json}");
    Ok(())
}
