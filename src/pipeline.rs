//! Per-frame pipeline composition.
//!
//! One frame, one synchronous pass: detections → target selection → motion
//! control → sink. There is no internal queue and no frame skipping; a frame
//! is fully processed before the next one is considered. Backpressure, if
//! any, is the frame transport's problem.

use anyhow::Result;

use crate::config::ControllerConfig;
use crate::control::{compute_command, Command};
use crate::detect::Detection;
use crate::select::{select_target, SelectionResult};
use crate::sink::CommandSink;

/// Observer invoked once per frame with the detection list and the selection
/// outcome. Debug overlays and visualization hang off this hook; the
/// selector and controller never know it exists.
pub type FrameObserver = Box<dyn FnMut(&[Detection], &SelectionResult)>;

/// Owns the controller configuration and runs the per-frame pass.
pub struct FollowPipeline {
    config: ControllerConfig,
    observer: Option<FrameObserver>,
}

impl FollowPipeline {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Attach a per-frame observer.
    pub fn with_observer(mut self, observer: FrameObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Process one frame's detections.
    ///
    /// Sends the computed command to `sink` when one is produced and returns
    /// it. `Ok(None)` means no actuation this frame (no qualifying target,
    /// or the target sits inside the dead-zone); the previous command is
    /// left standing by this layer.
    pub fn process_frame(
        &mut self,
        detections: &[Detection],
        sink: &mut dyn CommandSink,
    ) -> Result<Option<Command>> {
        let selection = select_target(detections, &self.config);

        if let Some(observer) = self.observer.as_mut() {
            observer(detections, &selection);
        }

        let command = compute_command(&selection, &self.config);
        if let Some(command) = command {
            sink.send(command)?;
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn person(area_side: f32, center_x: f32) -> Detection {
        let half = area_side / 2.0;
        Detection {
            class_id: 15,
            confidence: 0.9,
            x_min: center_x - half,
            y_min: 0.0,
            x_max: center_x + half,
            y_max: area_side,
            frame_width: 640,
            frame_height: 480,
        }
    }

    #[test]
    fn empty_frame_sends_nothing() {
        let mut pipeline = FollowPipeline::new(ControllerConfig::default());
        let mut sink = RecordingSink::new();

        let cmd = pipeline.process_frame(&[], &mut sink).unwrap();
        assert!(cmd.is_none());
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn qualifying_target_reaches_the_sink() {
        let mut pipeline = FollowPipeline::new(ControllerConfig::default());
        let mut sink = RecordingSink::new();

        // 200x200 box: area 40_000, above the dead-zone.
        let cmd = pipeline
            .process_frame(&[person(200.0, 320.0)], &mut sink)
            .unwrap()
            .expect("command");
        assert_eq!(sink.commands, vec![cmd]);
        assert_eq!(cmd.angular, 0.0);
        assert!(cmd.linear > 0.0);
    }

    #[test]
    fn dead_zone_target_is_observed_but_not_actuated() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_by_observer = Rc::clone(&seen);

        let mut pipeline = FollowPipeline::new(ControllerConfig::default()).with_observer(
            Box::new(move |detections, selection| {
                seen_by_observer
                    .borrow_mut()
                    .push((detections.len(), *selection));
            }),
        );
        let mut sink = RecordingSink::new();

        // 50x50 box: area 2_500, inside the dead-zone.
        let cmd = pipeline
            .process_frame(&[person(50.0, 100.0)], &mut sink)
            .unwrap();
        assert!(cmd.is_none());
        assert!(sink.commands.is_empty());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, 1);
        assert!(matches!(seen[0].1, SelectionResult::Target { .. }));
    }

    #[test]
    fn observer_sees_no_target_frames_too() {
        let count = Rc::new(RefCell::new(0u32));
        let counter = Rc::clone(&count);

        let mut pipeline = FollowPipeline::new(ControllerConfig::default())
            .with_observer(Box::new(move |_, _| *counter.borrow_mut() += 1));
        let mut sink = RecordingSink::new();

        pipeline.process_frame(&[], &mut sink).unwrap();
        pipeline.process_frame(&[], &mut sink).unwrap();
        assert_eq!(*count.borrow(), 2);
    }
}
