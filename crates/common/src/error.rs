//! Error types shared across BlinkScroll crates.

use std::path::PathBuf;

/// Top-level error type for BlinkScroll operations.
#[derive(Debug, thiserror::Error)]
pub enum BlinkscrollError {
    #[error("Frame stream error at line {line}: {message}")]
    Stream { line: usize, message: String },

    #[error("Sink error: {message}")]
    Sink { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using BlinkscrollError.
pub type BlinkscrollResult<T> = Result<T, BlinkscrollError>;

impl BlinkscrollError {
    pub fn stream(line: usize, msg: impl Into<String>) -> Self {
        Self::Stream {
            line,
            message: msg.into(),
        }
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the frame loop can skip past this error and keep reading.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Stream { .. })
    }
}
