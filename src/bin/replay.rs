//! replay - run a recorded detection log through the follow pipeline
//!
//! Reads a JSONL detection log (one JSON array of detections per line, one
//! line per frame) and writes every emitted command to stdout as JSON lines.
//! Useful for checking controller behavior against captured runs without a
//! camera or a model.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use person_follower::{
    ControllerConfig, DetectionSource, FollowPipeline, JsonWriterSink, JsonlSource,
    SelectionResult,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the JSONL detection log.
    log: PathBuf,
    /// Detector label id to follow.
    #[arg(long, env = "FOLLOWER_TARGET_CLASS", default_value_t = 15)]
    target_class: u32,
    /// Saturation bound on linear velocity magnitude.
    #[arg(long, default_value_t = 0.25)]
    max_velocity: f64,
    /// Optional saturation bound on angular velocity magnitude.
    #[arg(long)]
    max_angular_velocity: Option<f64>,
    /// Print a per-frame selection trace to stderr.
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = ControllerConfig {
        target_class: args.target_class,
        max_velocity: args.max_velocity,
        max_angular_velocity: args.max_angular_velocity,
        ..ControllerConfig::default()
    };

    let mut source = JsonlSource::open(&args.log)?;
    let trace = args.trace;
    let mut pipeline = FollowPipeline::new(config).with_observer(Box::new(
        move |detections, selection| {
            if !trace {
                return;
            }
            match selection {
                SelectionResult::Target { area, center_x, .. } => {
                    eprintln!(
                        "frame: {} detections, target area={:.0} center_x={:.0}",
                        detections.len(),
                        area,
                        center_x
                    );
                }
                SelectionResult::NoTarget => {
                    eprintln!("frame: {} detections, no target", detections.len());
                }
            }
        },
    ));

    let stdout = std::io::stdout();
    let mut sink = JsonWriterSink::new(stdout.lock());

    let mut frames = 0u64;
    let mut commands = 0u64;
    while let Some(detections) = source.next_frame()? {
        frames += 1;
        if pipeline.process_frame(&detections, &mut sink)?.is_some() {
            commands += 1;
        }
    }
    sink.into_inner().flush()?;

    log::info!("replayed {} frames, emitted {} commands", frames, commands);
    Ok(())
}
