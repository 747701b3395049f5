//! followerd - person-following control daemon
//!
//! This daemon:
//! 1. Ingests frames from the configured camera source
//! 2. Runs the configured detector backend on each frame
//! 3. Selects the nearest qualifying person as the target
//! 4. Emits bounded proportional velocity commands to the command sink
//! 5. Logs source health periodically

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};

use person_follower::{
    BackendRegistry, CameraConfig, CameraSource, DetectionSource, DetectorSource, FollowPipeline,
    FollowerConfig, LogSink, SelectionResult, StubBackend,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = FollowerConfig::load()?;

    let mut registry = BackendRegistry::new();
    registry.register(StubBackend::new().with_class(cfg.controller.target_class));
    registry.set_default(&cfg.source.detector).map_err(|_| {
        anyhow!(
            "detector '{}' not available (have: {})",
            cfg.source.detector,
            registry.list().join(", ")
        )
    })?;

    let mut camera = CameraSource::new(CameraConfig {
        url: cfg.source.url.clone(),
        width: cfg.source.width,
        height: cfg.source.height,
    })?;
    camera.connect()?;

    let backend = registry
        .default_backend()
        .ok_or_else(|| anyhow!("no detector backend registered"))?;
    let mut source = DetectorSource::new(camera, backend)?;
    log::info!("detector backend: {}", source.backend_name());

    let mut pipeline = FollowPipeline::new(cfg.controller.clone()).with_observer(Box::new(
        |detections, selection| {
            if let SelectionResult::Target { area, center_x, .. } = selection {
                log::debug!(
                    "target: area={:.0} center_x={:.0} (of {} detections)",
                    area,
                    center_x,
                    detections.len()
                );
            }
        },
    ));
    let mut sink = LogSink::new();

    let running = Arc::new(AtomicBool::new(true));
    let running_flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_flag.store(false, Ordering::SeqCst);
    })
    .expect("error setting Ctrl-C handler");

    let frame_interval = Duration::from_millis(1000 / u64::from(cfg.target_fps));
    let mut last_health_log = Instant::now();
    let mut frames = 0u64;
    let mut commands = 0u64;

    log::info!(
        "followerd running. source={} detector={} target_class={} fps={}",
        cfg.source.url,
        cfg.source.detector,
        cfg.controller.target_class,
        cfg.target_fps
    );

    while running.load(Ordering::SeqCst) {
        let Some(detections) = source.next_frame()? else {
            log::info!("detection source ended");
            break;
        };
        frames += 1;

        if pipeline.process_frame(&detections, &mut sink)?.is_some() {
            commands += 1;
        }

        if last_health_log.elapsed() >= Duration::from_secs(5) {
            let stats = source.stats();
            log::info!(
                "source health={} frames={} commands={} label={}",
                source.is_healthy(),
                stats.frames,
                commands,
                stats.label
            );
            last_health_log = Instant::now();
        }

        std::thread::sleep(frame_interval);
    }

    log::info!(
        "followerd stopping after {} frames, {} commands",
        frames,
        commands
    );
    Ok(())
}
