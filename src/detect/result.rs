use serde::{Deserialize, Serialize};

/// One classified, scored, localized object reported by the detector for a
/// single frame.
///
/// Box coordinates are pixels in the source frame. Detections are produced
/// once per frame and discarded after the frame is processed; nothing in the
/// pipeline holds them across frames.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Detection {
    /// Detector-specific class label id. Which id means "person" is part of
    /// the detector's contract and arrives via configuration.
    pub class_id: u32,
    /// Confidence score in [0, 1].
    pub confidence: f32,
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
    /// Dimensions of the frame this detection was reported in.
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Detection {
    /// Bounding-box area in square pixels.
    ///
    /// A degenerate box (x_min > x_max or y_min > y_max) yields a
    /// non-positive area. Callers filter on the value, not on box validity.
    pub fn area(&self) -> f64 {
        f64::from(self.x_max - self.x_min) * f64::from(self.y_max - self.y_min)
    }

    /// Horizontal center of the bounding box in pixels.
    pub fn center_x(&self) -> f64 {
        f64::from(self.x_min + self.x_max) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Detection {
        Detection {
            class_id: 15,
            confidence: 0.9,
            x_min,
            y_min,
            x_max,
            y_max,
            frame_width: 640,
            frame_height: 480,
        }
    }

    #[test]
    fn area_and_center_of_regular_box() {
        let d = det(100.0, 50.0, 300.0, 250.0);
        assert_eq!(d.area(), 40_000.0);
        assert_eq!(d.center_x(), 200.0);
    }

    #[test]
    fn inverted_box_has_non_positive_area() {
        let d = det(300.0, 50.0, 100.0, 250.0);
        assert!(d.area() <= 0.0);
    }

    #[test]
    fn detection_round_trips_through_json() {
        let d = det(10.0, 20.0, 30.0, 40.0);
        let json = serde_json::to_string(&d).unwrap();
        let back: Detection = serde_json::from_str(&json).unwrap();
        assert_eq!(back.class_id, d.class_id);
        assert_eq!(back.x_max, d.x_max);
        assert_eq!(back.frame_width, 640);
    }
}
