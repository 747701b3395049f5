//! Camera frame source and its pairing with a detector backend.
//!
//! `CameraSource` produces raw pixel frames. Only `stub://` URLs are
//! serviced in this build; anything else names a transport that lives
//! outside this crate and is rejected at construction. `DetectorSource`
//! composes a camera with a detector backend to form a `DetectionSource`.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use super::{DetectionSource, SourceStats};
use crate::detect::{Detection, DetectorBackend};

/// Configuration for a camera source.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Camera URL (e.g., "stub://front_camera").
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            url: "stub://front_camera".to_string(),
            width: 640,
            height: 480,
        }
    }
}

/// One raw frame of BGR pixels.
pub struct PixelFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Camera frame source.
pub struct CameraSource {
    config: CameraConfig,
    frame_count: u64,
    scene_state: u8,
}

impl CameraSource {
    pub fn new(config: CameraConfig) -> Result<Self> {
        if !config.url.starts_with("stub://") {
            return Err(anyhow!(
                "unsupported camera url '{}': only stub:// cameras ship in this build",
                config.url
            ));
        }
        if config.width == 0 || config.height == 0 {
            return Err(anyhow!("camera dimensions must be nonzero"));
        }
        Ok(Self {
            config,
            frame_count: 0,
            scene_state: 0,
        })
    }

    /// Connect to the camera.
    pub fn connect(&mut self) -> Result<()> {
        log::info!("CameraSource: connected to {} (synthetic)", self.config.url);
        Ok(())
    }

    /// Capture the next frame.
    pub fn next_frame(&mut self) -> Result<PixelFrame> {
        self.frame_count += 1;
        Ok(PixelFrame {
            data: self.generate_synthetic_pixels(),
            width: self.config.width,
            height: self.config.height,
        })
    }

    pub fn frames_captured(&self) -> u64 {
        self.frame_count
    }

    fn generate_synthetic_pixels(&mut self) -> Vec<u8> {
        let pixel_count = self.config.width as usize * self.config.height as usize * 3;
        if self.frame_count % 50 == 0 {
            self.scene_state = self.scene_state.wrapping_add(1);
        }
        let mut pixels = vec![0u8; pixel_count];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((i as u64 + self.frame_count + self.scene_state as u64) % 256) as u8;
        }
        pixels
    }
}

/// A camera driven through a detector backend: the live deployment shape of
/// a `DetectionSource`.
///
/// The backend arrives as the registry's shared handle. The model behind it
/// is constructed once and injected; test doubles slot straight in.
pub struct DetectorSource {
    camera: CameraSource,
    backend: Arc<Mutex<dyn DetectorBackend>>,
    backend_name: &'static str,
}

impl DetectorSource {
    pub fn new(camera: CameraSource, backend: Arc<Mutex<dyn DetectorBackend>>) -> Result<Self> {
        let backend_name = {
            let mut guard = backend
                .lock()
                .map_err(|_| anyhow!("detector backend lock poisoned"))?;
            guard.warm_up()?;
            guard.name()
        };
        Ok(Self {
            camera,
            backend,
            backend_name,
        })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend_name
    }
}

impl DetectionSource for DetectorSource {
    fn next_frame(&mut self) -> Result<Option<Vec<Detection>>> {
        let frame = self.camera.next_frame()?;
        let detections = self
            .backend
            .lock()
            .map_err(|_| anyhow!("detector backend lock poisoned"))?
            .detect(&frame.data, frame.width, frame.height)?;
        Ok(Some(detections))
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames: self.camera.frames_captured(),
            label: self.camera.config.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::StubBackend;

    #[test]
    fn rejects_non_stub_urls() {
        let config = CameraConfig {
            url: "rtsp://camera-1".to_string(),
            ..CameraConfig::default()
        };
        assert!(CameraSource::new(config).is_err());
    }

    #[test]
    fn synthetic_camera_produces_full_frames() {
        let mut camera = CameraSource::new(CameraConfig::default()).unwrap();
        camera.connect().unwrap();

        let frame = camera.next_frame().unwrap();
        assert_eq!(frame.data.len(), 640 * 480 * 3);
        assert_eq!(camera.frames_captured(), 1);
    }

    #[test]
    fn detector_source_yields_detections_per_frame() {
        let camera = CameraSource::new(CameraConfig::default()).unwrap();
        let backend: Arc<Mutex<dyn DetectorBackend>> = Arc::new(Mutex::new(StubBackend::new()));
        let mut source = DetectorSource::new(camera, backend).unwrap();

        let detections = source.next_frame().unwrap().expect("camera never ends");
        assert_eq!(detections.len(), 1);
        assert_eq!(source.stats().frames, 1);
        assert_eq!(source.backend_name(), "stub");
    }
}
