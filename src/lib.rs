//! person-follower: perception-to-control pipeline for a person-following
//! robot.
//!
//! Each camera frame runs one synchronous pass:
//!
//! 1. A detector backend (or a recorded log) yields this frame's detections.
//! 2. [`select::select_target`] picks the nearest qualifying person — the
//!    one with the largest apparent bounding-box area.
//! 3. [`control::compute_command`] turns the target's horizontal offset and
//!    apparent area into a bounded proportional velocity command, or
//!    withholds one inside the minimum-area dead-zone.
//! 4. A [`sink::CommandSink`] carries the command toward the drivetrain.
//!
//! The selector and controller are pure functions over the frame and the
//! read-only [`config::ControllerConfig`]; no state crosses frames, so
//! frames can be dropped or replayed freely by the surrounding transport.
//! There is no cross-frame identity tracking, no obstacle avoidance, and no
//! gain adaptation here.

pub mod config;
pub mod control;
pub mod detect;
pub mod ingest;
pub mod pipeline;
pub mod select;
pub mod sink;

pub use config::{ControllerConfig, FollowerConfig, SourceSettings};
pub use control::{compute_command, Command};
pub use detect::{BackendRegistry, Detection, DetectorBackend, StubBackend};
pub use ingest::{
    CameraConfig, CameraSource, DetectionSource, DetectorSource, JsonlSource, SourceStats,
};
pub use pipeline::{FollowPipeline, FrameObserver};
pub use select::{select_target, SelectionResult};
pub use sink::{CommandSink, JsonWriterSink, LogSink, RecordingSink};
