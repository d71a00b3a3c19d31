//! Scroll event sinks.
//!
//! [`ScrollEventWriter`] appends JSONL records for an external injector to
//! tail; [`TextSink`] prints human-readable lines.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use blinkscroll_common::config::DetectionConfig;
use blinkscroll_common::error::{BlinkscrollError, BlinkscrollResult};
use blinkscroll_landmark_model::frame::{timestamp_secs, TimestampNs};
use blinkscroll_landmark_model::scroll::ScrollEvent;
use serde::{Deserialize, Serialize};

use crate::ScrollSink;

/// First line of a scroll event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollLogHeader {
    pub schema_version: String,
    /// Wall-clock time the log was opened (RFC 3339).
    pub started_at: String,
    /// Detection parameters in effect for this run.
    pub detection: DetectionConfig,
}

/// One scroll event as written to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollRecord {
    /// Timestamp of the frame that completed the gesture.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    #[serde(flatten)]
    pub event: ScrollEvent,

    /// Signed wheel amount (positive = up).
    pub amount: i64,
}

impl ScrollRecord {
    pub fn new(timestamp_ns: TimestampNs, event: ScrollEvent) -> Self {
        Self {
            timestamp_ns,
            event,
            amount: event.signed_amount(),
        }
    }
}

/// Writes scroll events to a JSONL file.
pub struct ScrollEventWriter {
    writer: BufWriter<File>,
    events_written: u64,
}

impl ScrollEventWriter {
    /// Create the log file, writing the header as the first line.
    pub fn new(path: PathBuf, detection: &DetectionConfig) -> BlinkscrollResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        let header = ScrollLogHeader {
            schema_version: "1.0".to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
            detection: detection.clone(),
        };
        let header_json = serde_json::to_string(&header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| BlinkscrollError::sink(format!("Failed to write header: {e}")))?;

        tracing::debug!(path = %path.display(), "Opened scroll event log");
        Ok(Self {
            writer,
            events_written: 0,
        })
    }


}

impl ScrollSink for ScrollEventWriter {
    fn emit(&mut self, timestamp_ns: TimestampNs, event: &ScrollEvent) -> BlinkscrollResult<()> {
        let json = serde_json::to_string(&ScrollRecord::new(timestamp_ns, *event))?;
        writeln!(self.writer, "{json}")
            .map_err(|e| BlinkscrollError::sink(format!("Failed to write event: {e}")))?;
        self.events_written += 1;

        // Injectors tail this file, so every event goes out immediately.
        self.flush()
    }

    fn flush(&mut self) -> BlinkscrollResult<()> {
        self.writer
            .flush()
            .map_err(|e| BlinkscrollError::sink(format!("Failed to flush events: {e}")))
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}

impl Drop for ScrollEventWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
        tracing::debug!(events = self.events_written, "Closed scroll event log");
    }
}

/// Prints one line per event, e.g. `1.234s scroll down 100`.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> ScrollSink for TextSink<W> {
    fn emit(&mut self, timestamp_ns: TimestampNs, event: &ScrollEvent) -> BlinkscrollResult<()> {
        let secs = timestamp_secs(timestamp_ns);
        writeln!(self.out, "{secs:.3}s {event}")
            .map_err(|e| BlinkscrollError::sink(format!("Failed to print event: {e}")))
    }

    fn flush(&mut self) -> BlinkscrollResult<()> {
        self.out
            .flush()
            .map_err(|e| BlinkscrollError::sink(format!("Failed to flush output: {e}")))
    }

    fn name(&self) -> &str {
        "text"
    }
}
