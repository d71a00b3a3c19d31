pub mod config;
pub mod ratios;
pub mod run;

use std::io::BufReader;
use std::path::Path;

use blinkscroll_common::config::{DetectionConfig, FacePolicy};
use blinkscroll_frame_stream::{FrameSource, JsonlFrameSource};
use clap::Args;

/// Command-line overrides for the detection section of the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct DetectionOverrides {
    /// Eye aspect ratio below which the eyes count as closed
    #[arg(short = 't', long = "threshold")]
    pub eye_threshold: Option<f64>,

    /// Consecutive frames a gesture must be held before release counts
    #[arg(short = 'f', long = "frames")]
    pub min_frames: Option<u32>,

    /// Mouth aspect ratio below which the mouth counts as closed
    #[arg(short = 'm', long = "mthreshold")]
    pub mouth_threshold: Option<f64>,

    /// Scroll amount per gesture
    #[arg(long)]
    pub magnitude: Option<u32>,

    /// Trigger ownership with several faces: shared|per-face
    #[arg(long)]
    pub face_policy: Option<String>,
}

impl DetectionOverrides {
    /// Apply overrides on top of `config` and validate the result.
    pub fn apply(&self, mut config: DetectionConfig) -> anyhow::Result<DetectionConfig> {
        if let Some(v) = self.eye_threshold {
            config.eye_threshold = v;
        }
        if let Some(v) = self.min_frames {
            config.min_consecutive_frames = v;
        }
        if let Some(v) = self.mouth_threshold {
            config.mouth_threshold = v;
        }
        if let Some(v) = self.magnitude {
            config.scroll_magnitude = v;
        }
        if let Some(policy) = &self.face_policy {
            config.face_policy = policy.parse::<FacePolicy>()?;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Open a landmark stream file, or stdin for `-`.
pub fn open_source(input: &Path) -> anyhow::Result<Box<dyn FrameSource>> {
    if input == Path::new("-") {
        return Ok(Box::new(JsonlFrameSource::new(
            BufReader::new(std::io::stdin()),
            "stdin",
        )));
    }
    let source = JsonlFrameSource::open(input)
        .map_err(|e| anyhow::anyhow!("Failed to open landmark stream: {e}"))?;
    Ok(Box::new(source))
}
