//! Command sinks.
//!
//! The actuation boundary: a sink accepts each frame's command and hands it
//! to whatever moves the robot. Transport to a real drivetrain lives outside
//! this crate; the sinks here log, record, or serialize commands.
//!
//! Sends are fire-and-forget: no acknowledgment flows back into the
//! pipeline. A sink error surfaces from that frame's pipeline run, and the
//! caller decides whether to retry, skip, or shut down.

use std::io::Write;

use anyhow::Result;

use crate::control::Command;

/// Accepts one command per frame that produced one.
pub trait CommandSink {
    fn send(&mut self, command: Command) -> Result<()>;
}

/// Sink that logs each command. Stand-in actuator for builds without a
/// drivetrain transport.
#[derive(Default)]
pub struct LogSink {
    sent: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandSink for LogSink {
    fn send(&mut self, command: Command) -> Result<()> {
        self.sent += 1;
        log::info!(
            "cmd #{}: linear={:.4} angular={:.4}",
            self.sent,
            command.linear,
            command.angular
        );
        Ok(())
    }
}

/// Sink that writes one JSON object per command line.
pub struct JsonWriterSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandSink for JsonWriterSink<W> {
    fn send(&mut self, command: Command) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &command)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Sink that buffers commands for inspection in tests.
#[derive(Default)]
pub struct RecordingSink {
    pub commands: Vec<Command>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandSink for RecordingSink {
    fn send(&mut self, command: Command) -> Result<()> {
        self.commands.push(command);
        Ok(())
    }
}
