//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{BlinkscrollError, BlinkscrollResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gesture detection thresholds and scroll mapping.
    pub detection: DetectionConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// How detected faces map onto gesture trigger pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacePolicy {
    /// Every face in a frame drives the same blink/mouth trigger pair.
    #[default]
    Shared,
    /// Each face position in the frame's face list owns its own trigger pair.
    PerFace,
}

impl std::str::FromStr for FacePolicy {
    type Err = BlinkscrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared" => Ok(Self::Shared),
            "per-face" | "per_face" => Ok(Self::PerFace),
            other => Err(BlinkscrollError::config(format!(
                "unknown face policy '{other}' (expected 'shared' or 'per-face')"
            ))),
        }
    }
}

/// Gesture detection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Eye aspect ratio below which the eyes count as closed.
    pub eye_threshold: f64,

    /// Mouth aspect ratio below which the mouth counts as closed.
    pub mouth_threshold: f64,

    /// Consecutive below-threshold frames required before a release fires.
    pub min_consecutive_frames: u32,

    /// Scroll amount attached to every emitted event.
    pub scroll_magnitude: u32,

    /// Trigger ownership when several faces are in frame.
    pub face_policy: FacePolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "blinkscroll=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            eye_threshold: 0.19,
            mouth_threshold: 0.7,
            min_consecutive_frames: 2,
            scroll_magnitude: 100,
            face_policy: FacePolicy::Shared,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl DetectionConfig {
    /// Reject parameter combinations the triggers cannot run with.
    pub fn validate(&self) -> BlinkscrollResult<()> {
        for (name, value) in [
            ("eye_threshold", self.eye_threshold),
            ("mouth_threshold", self.mouth_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BlinkscrollError::config(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.min_consecutive_frames == 0 {
            return Err(BlinkscrollError::config(
                "min_consecutive_frames must be at least 1",
            ));
        }
        if self.scroll_magnitude == 0 {
            return Err(BlinkscrollError::config(
                "scroll_magnitude must be at least 1",
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> BlinkscrollResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &std::path::Path) -> BlinkscrollResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("blinkscroll").join("config.json")
}
