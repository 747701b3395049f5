//! Target selection.
//!
//! Reduces a frame's detection list to at most one target: the nearest
//! qualifying person, where "nearest" means largest apparent bounding-box
//! area. Pure function of its inputs; no state crosses frames.

use crate::config::ControllerConfig;
use crate::detect::Detection;

/// Outcome of one frame's selection step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectionResult {
    /// No detection matched the target class above the confidence threshold.
    NoTarget,
    /// The nearest qualifying detection this frame.
    Target {
        /// Horizontal center of the target's box in pixels.
        center_x: f64,
        /// Apparent box area in square pixels.
        area: f64,
        /// Width of the frame the target was detected in.
        frame_width: u32,
    },
}

/// Pick the nearest qualifying detection (largest box area).
///
/// A detection qualifies when its class id matches `config.target_class` and
/// its confidence is strictly above `config.confidence_threshold`. The best
/// candidate is replaced only on strict area improvement, so equal-area ties
/// resolve to the first detection seen. Candidates with a non-finite area or
/// center are skipped; a degenerate box has non-positive area and never
/// beats a real one.
pub fn select_target(detections: &[Detection], config: &ControllerConfig) -> SelectionResult {
    let mut best: Option<(f64, f64, u32)> = None;

    for detection in detections {
        if detection.class_id != config.target_class {
            continue;
        }
        if !(detection.confidence > config.confidence_threshold) {
            continue;
        }

        let area = detection.area();
        let center_x = detection.center_x();
        if !area.is_finite() || !center_x.is_finite() {
            continue;
        }

        let improves = match best {
            Some((best_area, _, _)) => area > best_area,
            None => true,
        };
        if improves {
            best = Some((area, center_x, detection.frame_width));
        }
    }

    match best {
        Some((area, center_x, frame_width)) => SelectionResult::Target {
            center_x,
            area,
            frame_width,
        },
        None => SelectionResult::NoTarget,
    }
}
