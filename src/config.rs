use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

// MobileNetSSD's label set puts "person" at index 15. This is only the
// default; deployments bind whatever id their detector uses.
const DEFAULT_TARGET_CLASS: u32 = 15;
const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.2;
const DEFAULT_MIN_AREA: f64 = 10_000.0;
const DEFAULT_REFERENCE_AREA: f64 = 150_000.0;
const DEFAULT_ROTATION_GAIN: f64 = 0.002;
const DEFAULT_VELOCITY_GAIN: f64 = 0.000_004_5;
const DEFAULT_MAX_VELOCITY: f64 = 0.25;
const DEFAULT_SOURCE_URL: &str = "stub://front_camera";
const DEFAULT_SOURCE_WIDTH: u32 = 640;
const DEFAULT_SOURCE_HEIGHT: u32 = 480;
const DEFAULT_DETECTOR: &str = "stub";
const DEFAULT_TARGET_FPS: u32 = 10;

#[derive(Debug, Deserialize, Default)]
struct FollowerConfigFile {
    controller: Option<ControllerConfigFile>,
    source: Option<SourceConfigFile>,
    target_fps: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct ControllerConfigFile {
    target_class: Option<u32>,
    confidence_threshold: Option<f32>,
    min_area: Option<f64>,
    reference_area: Option<f64>,
    rotation_gain: Option<f64>,
    velocity_gain: Option<f64>,
    max_velocity: Option<f64>,
    max_angular_velocity: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct SourceConfigFile {
    url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    detector: Option<String>,
}

/// Gains and thresholds for target selection and motion control.
///
/// Read-only after startup. Every knob here is a deployment parameter
/// (camera resolution, robot speed limits), never a hard-coded constant in
/// the pipeline.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Detector label id to follow.
    pub target_class: u32,
    /// Detections at or below this confidence are ignored.
    pub confidence_threshold: f32,
    /// Dead-zone: targets with a box area at or below this are not acted on.
    pub min_area: f64,
    /// Apparent area at the desired following distance (the setpoint).
    pub reference_area: f64,
    pub rotation_gain: f64,
    pub velocity_gain: f64,
    /// Saturation bound on linear velocity magnitude.
    pub max_velocity: f64,
    /// Optional saturation bound on angular velocity magnitude. The
    /// reference controller leaves rotation uncapped; this stays `None`
    /// unless a deployment opts in.
    pub max_angular_velocity: Option<f64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            target_class: DEFAULT_TARGET_CLASS,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            min_area: DEFAULT_MIN_AREA,
            reference_area: DEFAULT_REFERENCE_AREA,
            rotation_gain: DEFAULT_ROTATION_GAIN,
            velocity_gain: DEFAULT_VELOCITY_GAIN,
            max_velocity: DEFAULT_MAX_VELOCITY,
            max_angular_velocity: None,
        }
    }
}

/// Camera/detector source settings for the daemon.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// Name of the detector backend to run frames through.
    pub detector: String,
}

/// Full daemon configuration: controller gains plus source and loop rate.
#[derive(Debug, Clone)]
pub struct FollowerConfig {
    pub controller: ControllerConfig,
    pub source: SourceSettings,
    pub target_fps: u32,
}

impl FollowerConfig {
    /// Load configuration: optional JSON file named by `FOLLOWER_CONFIG`,
    /// then environment overrides, then validation.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("FOLLOWER_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: FollowerConfigFile) -> Self {
        let controller_file = file.controller.unwrap_or_default();
        let controller = ControllerConfig {
            target_class: controller_file.target_class.unwrap_or(DEFAULT_TARGET_CLASS),
            confidence_threshold: controller_file
                .confidence_threshold
                .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD),
            min_area: controller_file.min_area.unwrap_or(DEFAULT_MIN_AREA),
            reference_area: controller_file
                .reference_area
                .unwrap_or(DEFAULT_REFERENCE_AREA),
            rotation_gain: controller_file
                .rotation_gain
                .unwrap_or(DEFAULT_ROTATION_GAIN),
            velocity_gain: controller_file
                .velocity_gain
                .unwrap_or(DEFAULT_VELOCITY_GAIN),
            max_velocity: controller_file.max_velocity.unwrap_or(DEFAULT_MAX_VELOCITY),
            max_angular_velocity: controller_file.max_angular_velocity,
        };
        let source_file = file.source.unwrap_or_default();
        let source = SourceSettings {
            url: source_file
                .url
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            width: source_file.width.unwrap_or(DEFAULT_SOURCE_WIDTH),
            height: source_file.height.unwrap_or(DEFAULT_SOURCE_HEIGHT),
            detector: source_file
                .detector
                .unwrap_or_else(|| DEFAULT_DETECTOR.to_string()),
        };
        Self {
            controller,
            source,
            target_fps: file.target_fps.unwrap_or(DEFAULT_TARGET_FPS),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("FOLLOWER_SOURCE_URL") {
            if !url.trim().is_empty() {
                self.source.url = url;
            }
        }
        if let Ok(class) = std::env::var("FOLLOWER_TARGET_CLASS") {
            let class: u32 = class
                .parse()
                .map_err(|_| anyhow!("FOLLOWER_TARGET_CLASS must be an integer label id"))?;
            self.controller.target_class = class;
        }
        if let Ok(fps) = std::env::var("FOLLOWER_TARGET_FPS") {
            let fps: u32 = fps
                .parse()
                .map_err(|_| anyhow!("FOLLOWER_TARGET_FPS must be an integer frame rate"))?;
            self.target_fps = fps;
        }
        if let Ok(max_velocity) = std::env::var("FOLLOWER_MAX_VELOCITY") {
            let max_velocity: f64 = max_velocity
                .parse()
                .map_err(|_| anyhow!("FOLLOWER_MAX_VELOCITY must be a number"))?;
            self.controller.max_velocity = max_velocity;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let c = &self.controller;
        if !(0.0..=1.0).contains(&c.confidence_threshold) {
            return Err(anyhow!("confidence_threshold must be within [0, 1]"));
        }
        if !c.min_area.is_finite() || c.min_area < 0.0 {
            return Err(anyhow!("min_area must be finite and non-negative"));
        }
        if !c.reference_area.is_finite() || c.reference_area <= 0.0 {
            return Err(anyhow!("reference_area must be finite and positive"));
        }
        if !c.rotation_gain.is_finite() || c.rotation_gain <= 0.0 {
            return Err(anyhow!("rotation_gain must be finite and positive"));
        }
        if !c.velocity_gain.is_finite() || c.velocity_gain <= 0.0 {
            return Err(anyhow!("velocity_gain must be finite and positive"));
        }
        if !c.max_velocity.is_finite() || c.max_velocity <= 0.0 {
            return Err(anyhow!("max_velocity must be finite and positive"));
        }
        if let Some(cap) = c.max_angular_velocity {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(anyhow!("max_angular_velocity must be finite and positive"));
            }
        }
        if self.source.width == 0 || self.source.height == 0 {
            return Err(anyhow!("source dimensions must be nonzero"));
        }
        if self.target_fps == 0 {
            return Err(anyhow!("target_fps must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self::from_file(FollowerConfigFile::default())
    }
}

fn read_config_file(path: &Path) -> Result<FollowerConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_controller() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.target_class, 15);
        assert_eq!(cfg.confidence_threshold, 0.2);
        assert_eq!(cfg.min_area, 10_000.0);
        assert_eq!(cfg.reference_area, 150_000.0);
        assert_eq!(cfg.rotation_gain, 0.002);
        assert_eq!(cfg.velocity_gain, 0.000_004_5);
        assert_eq!(cfg.max_velocity, 0.25);
        assert!(cfg.max_angular_velocity.is_none());
    }

    #[test]
    fn validate_rejects_bad_threshold() {
        let mut cfg = FollowerConfig::default();
        cfg.controller.confidence_threshold = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_gains() {
        // A negative gain inverts both command signs: a left-of-center
        // target would steer away and a far target would back off.
        let mut cfg = FollowerConfig::default();
        cfg.controller.rotation_gain = -0.002;
        assert!(cfg.validate().is_err());

        let mut cfg = FollowerConfig::default();
        cfg.controller.velocity_gain = -0.000_004_5;
        assert!(cfg.validate().is_err());

        let mut cfg = FollowerConfig::default();
        cfg.controller.rotation_gain = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_fps() {
        let mut cfg = FollowerConfig::default();
        cfg.target_fps = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_angular_cap() {
        let mut cfg = FollowerConfig::default();
        cfg.controller.max_angular_velocity = Some(0.0);
        assert!(cfg.validate().is_err());
    }
}
