use anyhow::Result;

use crate::detect::result::Detection;

/// Detector backend trait.
///
/// This is the boundary to the black-box object-detection model: pixels go
/// in, a per-frame detection list comes out. Model architecture, weights,
/// and preprocessing all live behind this trait.
///
/// Backends are constructed once (model loading is expensive) and injected
/// into whatever drives the pipeline, so tests can substitute a backend that
/// returns canned detections.
pub trait DetectorBackend: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on one frame.
    ///
    /// Implementations must treat the pixel slice as read-only and must not
    /// retain it beyond the call. Box coordinates in the returned detections
    /// are pixels in the given frame dimensions.
    fn detect(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<Vec<Detection>>;

    /// Optional warm-up hook for backends that benefit from a priming pass.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
