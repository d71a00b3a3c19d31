//! BlinkScroll Frame Stream
//!
//! Drives the gesture core from a landmark stream and forwards the
//! resulting scroll events to a sink. Uses pluggable ends:
//!
//! - **Sources:** anything that yields [`LandmarkFrame`]s (JSONL files, stdin)
//! - **Sinks:** anything that accepts [`ScrollEvent`]s (JSONL log, text, memory)
//!
//! Frames are processed one at a time on the calling thread. The only
//! blocking point is the source waiting for its next frame.

pub mod reader;
pub mod writer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use blinkscroll_common::error::{BlinkscrollError, BlinkscrollResult};
use blinkscroll_gesture_core::{FrameReport, GestureCoordinator};
use blinkscroll_landmark_model::face::FaceLandmarks;
use blinkscroll_landmark_model::frame::{LandmarkFrame, TimestampNs};
use blinkscroll_landmark_model::scroll::{ScrollDirection, ScrollEvent};

pub use reader::JsonlFrameSource;
pub use writer::{ScrollEventWriter, TextSink};

/// Trait for landmark frame producers.
pub trait FrameSource: Send {
    /// Read the next frame. Returns `None` once the stream is exhausted.
    fn next_frame(&mut self) -> BlinkscrollResult<Option<LandmarkFrame>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Trait for scroll event consumers.
pub trait ScrollSink: Send {
    /// Deliver one event, tagged with the timestamp of the frame that produced it.
    fn emit(&mut self, timestamp_ns: TimestampNs, event: &ScrollEvent) -> BlinkscrollResult<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> BlinkscrollResult<()> {
        Ok(())
    }

    /// Sink name for logging.
    fn name(&self) -> &str;
}

/// Events collected by a [`VecSink`], shared with whoever created it.
pub type SharedEvents = Arc<Mutex<Vec<(TimestampNs, ScrollEvent)>>>;

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    events: SharedEvents,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that stays readable after the sink is moved into a runner.
    pub fn events(&self) -> SharedEvents {
        self.events.clone()
    }
}

impl ScrollSink for VecSink {
    fn emit(&mut self, timestamp_ns: TimestampNs, event: &ScrollEvent) -> BlinkscrollResult<()> {
        self.events
            .lock()
            .map_err(|_| BlinkscrollError::sink("event buffer poisoned"))?
            .push((timestamp_ns, *event));
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames handed to the coordinator.
    pub frames: u64,
    /// Faces handed to the coordinator.
    pub faces: u64,
    pub scrolls_up: u64,
    pub scrolls_down: u64,
    /// Skipped measurements (geometry errors).
    pub warnings: u64,
    /// Face records that could not be resolved into regions.
    pub rejected_faces: u64,
    /// Stream lines that failed to parse.
    pub skipped_lines: u64,
}

/// A frame that went through the coordinator.
#[derive(Debug, Clone)]
pub struct ProcessedFrame {
    pub timestamp_ns: TimestampNs,
    pub report: FrameReport,
}

/// The frame loop: source -> coordinator -> sink.
pub struct GestureRunner {
    source: Box<dyn FrameSource>,
    sink: Box<dyn ScrollSink>,
    coordinator: GestureCoordinator,
    stop_flag: Arc<AtomicBool>,
    stats: RunStats,
}

impl GestureRunner {
    pub fn new(
        source: Box<dyn FrameSource>,
        sink: Box<dyn ScrollSink>,
        coordinator: GestureCoordinator,
    ) -> Self {
        Self {
            source,
            sink,
            coordinator,
            stop_flag: Arc::new(AtomicBool::new(false)),
            stats: RunStats::default(),
        }
    }

    /// Run until the source is exhausted or the stop flag is set.
    ///
    /// Malformed stream lines and unusable faces are logged and skipped;
    /// I/O and sink failures end the run.
    pub fn run(&mut self) -> BlinkscrollResult<RunStats> {
        tracing::info!(
            source = %self.source.name(),
            sink = %self.sink.name(),
            "Gesture runner started"
        );

        while !self.stop_flag.load(Ordering::Relaxed) {
            if self.step()?.is_none() {
                break;
            }
        }

        self.sink.flush()?;
        tracing::info!(
            frames = self.stats.frames,
            scrolls_up = self.stats.scrolls_up,
            scrolls_down = self.stats.scrolls_down,
            "Gesture runner stopped"
        );
        Ok(self.stats)
    }

    /// Read and process the next readable frame. Returns `None` at end of stream.
    pub fn step(&mut self) -> BlinkscrollResult<Option<ProcessedFrame>> {
        loop {
            match self.source.next_frame() {
                Ok(Some(frame)) => {
                    let timestamp_ns = frame.timestamp_ns;
                    let report = self.process(frame)?;
                    return Ok(Some(ProcessedFrame {
                        timestamp_ns,
                        report,
                    }));
                }
                Ok(None) => return Ok(None),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "Skipping unreadable frame");
                    self.stats.skipped_lines += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Process one frame: resolve faces, update triggers, emit events.
    ///
    /// Face records that cannot be resolved keep their slot, so the faces
    /// after them stay on their own trigger pairs.
    pub fn process(&mut self, frame: LandmarkFrame) -> BlinkscrollResult<FrameReport> {
        let timestamp_ns = frame.timestamp_ns;
        let faces: Vec<Option<FaceLandmarks>> = frame
            .faces
            .into_iter()
            .enumerate()
            .map(|(index, record)| match record.into_landmarks() {
                Ok(face) => Some(face),
                Err(e) => {
                    tracing::warn!(
                        t = timestamp_ns,
                        face = index,
                        error = %e,
                        "Dropping face record"
                    );
                    self.stats.rejected_faces += 1;
                    None
                }
            })
            .collect();

        let report = self.coordinator.process_slots(&faces);

        self.stats.frames += 1;
        self.stats.faces += faces.iter().flatten().count() as u64;
        self.stats.warnings += report.warnings.len() as u64;

        for event in &report.events {
            match event.direction {
                ScrollDirection::Up => self.stats.scrolls_up += 1,
                ScrollDirection::Down => self.stats.scrolls_down += 1,
            }
            tracing::info!(t = timestamp_ns, "{event}");
            self.sink.emit(timestamp_ns, event)?;
        }

        Ok(report)
    }

    /// Stop flag shared with signal handlers. Once set, the loop exits at
    /// the next frame boundary.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Counters so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }
}
