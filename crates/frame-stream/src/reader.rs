//! JSONL landmark frame reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use blinkscroll_common::error::{BlinkscrollError, BlinkscrollResult};
use blinkscroll_landmark_model::frame::{parse_header_line, FrameStreamHeader, LandmarkFrame};

use crate::FrameSource;

/// Reads landmark frames one JSON line at a time.
///
/// Blank lines and `#` comment lines are skipped; the first `# {json}` line
/// that parses as a [`FrameStreamHeader`] is kept as the stream header.
pub struct JsonlFrameSource<R> {
    reader: R,
    name: String,
    line_no: usize,
    header: Option<FrameStreamHeader>,
    buf: Vec<u8>,
}

impl JsonlFrameSource<BufReader<File>> {
    /// Open a landmark stream file.
    pub fn open(path: &Path) -> BlinkscrollResult<Self> {
        if !path.exists() {
            return Err(BlinkscrollError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> JsonlFrameSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line_no: 0,
            header: None,
            buf: Vec::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead + Send> FrameSource for JsonlFrameSource<R> {
    fn next_frame(&mut self) -> BlinkscrollResult<Option<LandmarkFrame>> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = std::str::from_utf8(&self.buf)
                .map_err(|e| BlinkscrollError::stream(self.line_no, e.to_string()))?
                .trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                if self.header.is_none() {
                    if let Some(header) = parse_header_line(line) {
                        tracing::debug!(
                            source = %self.name,
                            schema = %header.schema_version,
                            producer = ?header.source,
                            fps = ?header.fps,
                            "Read landmark stream header"
                        );
                        self.header = Some(header);
                    }
                }
                continue;
            }

            return serde_json::from_str(line)
                .map(Some)
                .map_err(|e| BlinkscrollError::stream(self.line_no, e.to_string()));
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
