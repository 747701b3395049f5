//! Proportional motion control.
//!
//! Maps a frame's selection result to a drivetrain command. Stateless: each
//! frame's command depends only on that frame's target and the static
//! configuration, so there is no windup and no hidden temporal coupling.

use serde::{Deserialize, Serialize};

use crate::config::ControllerConfig;
use crate::select::SelectionResult;

/// One drivetrain command: forward speed and rotation rate.
///
/// Positive `linear` drives forward, positive `angular` rotates toward the
/// left edge of the frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub linear: f64,
    pub angular: f64,
}

/// Compute this frame's command, if any.
///
/// Returns `None` for `NoTarget` and for targets inside the minimum-area
/// dead-zone; the caller decides what an absent command means for the
/// actuator (this layer never emits an implicit stop).
///
/// Linear velocity is proportional to the area error against the reference
/// area and clamped to `±max_velocity`. Angular velocity is proportional to
/// the horizontal offset from frame center and, matching the reference
/// controller, unsaturated unless `max_angular_velocity` is configured.
pub fn compute_command(result: &SelectionResult, config: &ControllerConfig) -> Option<Command> {
    let (center_x, area, frame_width) = match *result {
        SelectionResult::NoTarget => return None,
        SelectionResult::Target {
            center_x,
            area,
            frame_width,
        } => (center_x, area, frame_width),
    };

    if area <= config.min_area {
        return None;
    }

    let linear = (config.velocity_gain * (config.reference_area - area))
        .clamp(-config.max_velocity, config.max_velocity);

    let mut angular = config.rotation_gain * (f64::from(frame_width) / 2.0 - center_x);
    if let Some(cap) = config.max_angular_velocity {
        angular = angular.clamp(-cap, cap);
    }

    Some(Command { linear, angular })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn config() -> ControllerConfig {
        ControllerConfig::default()
    }

    fn target(center_x: f64, area: f64) -> SelectionResult {
        SelectionResult::Target {
            center_x,
            area,
            frame_width: 640,
        }
    }

    #[test]
    fn no_target_produces_no_command() {
        assert!(compute_command(&SelectionResult::NoTarget, &config()).is_none());
    }

    #[test]
    fn dead_zone_withholds_command() {
        // Below and exactly at min_area: no command regardless of position.
        assert!(compute_command(&target(100.0, 5_000.0), &config()).is_none());
        assert!(compute_command(&target(100.0, 10_000.0), &config()).is_none());
        assert!(compute_command(&target(600.0, 9_999.0), &config()).is_none());
    }

    #[test]
    fn reference_scenario_saturates_linear() {
        // frame_width=640, area=20_000, center_x=100:
        // angular = 0.002 * (320 - 100) = 0.44
        // linear = 0.0000045 * (150_000 - 20_000) = 0.585, clamped to 0.25
        let cmd = compute_command(&target(100.0, 20_000.0), &config()).expect("command");
        assert!((cmd.angular - 0.44).abs() < EPS);
        assert!((cmd.linear - 0.25).abs() < EPS);
    }

    #[test]
    fn backs_off_when_target_is_too_close() {
        let cmd = compute_command(&target(320.0, 400_000.0), &config()).expect("command");
        assert!(cmd.linear < 0.0);
        assert!((cmd.linear + 0.25).abs() < EPS, "clamped at -max_velocity");
    }

    #[test]
    fn linear_velocity_is_monotonic_in_area() {
        let cfg = config();
        let areas = [11_000.0, 50_000.0, 150_000.0, 200_000.0, 500_000.0];
        let speeds: Vec<f64> = areas
            .iter()
            .map(|&a| compute_command(&target(320.0, a), &cfg).unwrap().linear)
            .collect();

        for pair in speeds.windows(2) {
            assert!(pair[1] <= pair[0], "larger area must not drive faster");
        }
        for v in &speeds {
            assert!(*v >= -cfg.max_velocity && *v <= cfg.max_velocity);
        }
    }

    #[test]
    fn angular_sign_follows_horizontal_offset() {
        let centered = compute_command(&target(320.0, 50_000.0), &config()).unwrap();
        assert_eq!(centered.angular, 0.0);

        let left = compute_command(&target(100.0, 50_000.0), &config()).unwrap();
        assert!(left.angular > 0.0, "target left of center: rotate left");

        let right = compute_command(&target(500.0, 50_000.0), &config()).unwrap();
        assert!(right.angular < 0.0, "target right of center: rotate right");
    }

    #[test]
    fn angular_is_unsaturated_by_default() {
        // Offset of 320 px at the default gain is 0.64, well past the linear
        // cap. It must pass through untouched.
        let cmd = compute_command(&target(0.0, 50_000.0), &config()).unwrap();
        assert!((cmd.angular - 0.64).abs() < EPS);
    }

    #[test]
    fn optional_angular_cap_clamps_both_signs() {
        let cfg = ControllerConfig {
            max_angular_velocity: Some(0.5),
            ..ControllerConfig::default()
        };

        let left = compute_command(&target(0.0, 50_000.0), &cfg).unwrap();
        assert!((left.angular - 0.5).abs() < EPS);

        let right = compute_command(&target(640.0, 50_000.0), &cfg).unwrap();
        assert!((right.angular + 0.5).abs() < EPS);
    }
}
