//! Recorded detection log source.
//!
//! Replays a JSONL file — one JSON array of detections per line, one line
//! per frame — through the pipeline, so controller behavior can be checked
//! against captured runs without a camera or a model. Blank lines are
//! skipped; the source ends at end of file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use super::{DetectionSource, SourceStats};
use crate::detect::Detection;

/// Detection log source reading one frame per line.
pub struct JsonlSource {
    reader: BufReader<File>,
    path: String,
    frames: u64,
    line_no: u64,
}

impl JsonlSource {
    pub fn open(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        if display.contains("://") {
            return Err(anyhow!(
                "detection logs must be local files (no URL schemes)"
            ));
        }
        let file = File::open(path)
            .with_context(|| format!("failed to open detection log {}", display))?;
        Ok(Self {
            reader: BufReader::new(file),
            path: display,
            frames: 0,
            line_no: 0,
        })
    }
}

impl DetectionSource for JsonlSource {
    fn next_frame(&mut self) -> Result<Option<Vec<Detection>>> {
        loop {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .with_context(|| format!("failed to read {}", self.path))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            let detections: Vec<Detection> = serde_json::from_str(line.trim())
                .with_context(|| format!("{}:{}: invalid detection record", self.path, self.line_no))?;
            self.frames += 1;
            return Ok(Some(detections));
        }
    }

    fn stats(&self) -> SourceStats {
        SourceStats {
            frames: self.frames,
            label: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn replays_frames_and_ends_at_eof() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[{{"class_id":15,"confidence":0.9,"x_min":0.0,"y_min":0.0,"x_max":100.0,"y_max":100.0,"frame_width":640,"frame_height":480}}]"#
        )
        .unwrap();
        writeln!(file).unwrap();
        writeln!(file, "[]").unwrap();

        let mut source = JsonlSource::open(file.path()).unwrap();

        let first = source.next_frame().unwrap().expect("frame 1");
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].class_id, 15);

        let second = source.next_frame().unwrap().expect("frame 2");
        assert!(second.is_empty());

        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(source.stats().frames, 2);
    }

    #[test]
    fn malformed_line_reports_position() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let mut source = JsonlSource::open(file.path()).unwrap();
        let err = source.next_frame().unwrap_err().to_string();
        assert!(err.contains(":1:"), "unexpected error: {}", err);
    }
}
