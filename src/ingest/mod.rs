//! Detection sources.
//!
//! A `DetectionSource` yields one detection list per frame. The pipeline is
//! driven the same way regardless of where frames come from:
//! - a camera plus a detector backend (`DetectorSource` over `CameraSource`)
//! - a recorded detection log (`JsonlSource`)
//! - canned lists in tests
//!
//! Real camera and drivetrain transports are external collaborators; the
//! only camera shipped here is the `stub://` synthetic one.

use anyhow::Result;

use crate::detect::Detection;

pub mod camera;
pub mod replay;

pub use camera::{CameraConfig, CameraSource, DetectorSource};
pub use replay::JsonlSource;

/// Per-frame supplier of detection lists.
pub trait DetectionSource {
    /// Produce the next frame's detections. `Ok(None)` means the source is
    /// exhausted (recorded logs end; cameras never do).
    fn next_frame(&mut self) -> Result<Option<Vec<Detection>>>;

    /// Whether the source is still usable.
    fn is_healthy(&self) -> bool {
        true
    }

    /// Frame statistics for health logging.
    fn stats(&self) -> SourceStats;
}

/// Statistics for a detection source.
#[derive(Clone, Debug)]
pub struct SourceStats {
    pub frames: u64,
    pub label: String,
}
