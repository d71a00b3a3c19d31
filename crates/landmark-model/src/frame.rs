//! Landmark frame stream types.
//!
//! A landmark stream is JSONL: an optional `# {header}` comment line, then
//! one JSON object per video frame listing the faces found in it. A frame
//! with an empty `faces` list is valid and means nobody was detected.

use serde::{Deserialize, Serialize};

use crate::face::{FaceLandmarks, FaceRecord};

/// Timestamp in nanoseconds since the stream started.
pub type TimestampNs = u64;

/// Stream-level metadata written as the first (comment) line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Free-form description of the landmark producer (camera, file, model).
    #[serde(default)]
    pub source: Option<String>,

    /// Frame dimensions in pixels, when the producer knows them.
    #[serde(default)]
    pub frame_width: Option<u32>,
    #[serde(default)]
    pub frame_height: Option<u32>,

    /// Nominal frame rate.
    #[serde(default)]
    pub fps: Option<f64>,
}

impl Default for FrameStreamHeader {
    fn default() -> Self {
        Self {
            schema_version: "1.0".to_string(),
            source: None,
            frame_width: None,
            frame_height: None,
            fps: None,
        }
    }
}

/// Landmarks for every face detected in one video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    #[serde(rename = "t", default)]
    pub timestamp_ns: TimestampNs,

    #[serde(default)]
    pub faces: Vec<FaceRecord>,
}

impl LandmarkFrame {
    pub fn new(timestamp_ns: TimestampNs, faces: Vec<FaceLandmarks>) -> Self {
        Self {
            timestamp_ns,
            faces: faces.into_iter().map(FaceRecord::from).collect(),
        }
    }
}

/// Nanosecond timestamp as fractional seconds since stream start.
pub fn timestamp_secs(timestamp_ns: TimestampNs) -> f64 {
    timestamp_ns as f64 / 1_000_000_000.0
}

/// Parse frames from JSONL content, skipping blank and `#` comment lines.
pub fn parse_frames(jsonl: &str) -> Result<Vec<LandmarkFrame>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[LandmarkFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

/// Parse a `# {json}` header line. Returns `None` for anything else.
pub fn parse_header_line(line: &str) -> Option<FrameStreamHeader> {
    let body = line.trim().strip_prefix('#')?;
    serde_json::from_str(body.trim()).ok()
}
