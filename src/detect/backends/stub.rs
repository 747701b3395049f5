use anyhow::Result;
use rand::Rng;

use crate::detect::backend::DetectorBackend;
use crate::detect::result::Detection;

/// Stub backend for testing and `stub://` cameras.
///
/// Emits a single synthetic person whose box paces back and forth across the
/// frame while its apparent size swells and shrinks, so the controller sees
/// both steering and distance error without a real model in the loop.
/// Confidence carries a small random jitter to keep thresholding honest.
pub struct StubBackend {
    person_class: u32,
    frame_count: u64,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            person_class: 15,
            frame_count: 0,
        }
    }

    /// Override the class id reported for the synthetic person.
    pub fn with_class(mut self, class_id: u32) -> Self {
        self.person_class = class_id;
        self
    }

    fn synthetic_person(&self, width: u32, height: u32) -> Detection {
        let w = f64::from(width);
        let h = f64::from(height);

        // Triangle wave in [0, 1] for horizontal pacing, period 160 frames.
        let walk_phase = {
            let t = (self.frame_count % 160) as f64 / 160.0;
            if t < 0.5 {
                t * 2.0
            } else {
                2.0 - t * 2.0
            }
        };
        // Slower triangle wave for approach/retreat, period 300 frames.
        let range_phase = {
            let t = (self.frame_count % 300) as f64 / 300.0;
            if t < 0.5 {
                t * 2.0
            } else {
                2.0 - t * 2.0
            }
        };

        // Box half-extent grows as the person "approaches".
        let half_w = (0.05 + 0.25 * range_phase) * w;
        let half_h = (0.15 + 0.30 * range_phase) * h;
        let center_x = half_w + walk_phase * (w - 2.0 * half_w);
        let center_y = h / 2.0;

        let confidence = rand::thread_rng().gen_range(0.75..0.95);

        Detection {
            class_id: self.person_class,
            confidence,
            x_min: (center_x - half_w).max(0.0) as f32,
            y_min: (center_y - half_h).max(0.0) as f32,
            x_max: (center_x + half_w).min(w) as f32,
            y_max: (center_y + half_h).min(h) as f32,
            frame_width: width,
            frame_height: height,
        }
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _pixels: &[u8], width: u32, height: u32) -> Result<Vec<Detection>> {
        self.frame_count += 1;
        Ok(vec![self.synthetic_person(width, height)])
    }
}
