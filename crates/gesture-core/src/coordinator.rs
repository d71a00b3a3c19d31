//! Per-frame gesture coordination.
//!
//! For every face in a frame the coordinator averages both eye aspect
//! ratios, computes the mouth aspect ratio, feeds the blink and mouth
//! triggers, and turns their pulses into scroll events:
//!
//! - blink pulse -> scroll down
//! - mouth pulse -> scroll up
//!
//! A measurement that cannot be computed is skipped for that frame and
//! reported as a warning; the matching trigger keeps its state.

use blinkscroll_common::config::{DetectionConfig, FacePolicy};
use blinkscroll_landmark_model::face::FaceLandmarks;
use blinkscroll_landmark_model::scroll::ScrollEvent;

use crate::error::GeometryError;
use crate::ratio::{eye_aspect_ratio, mouth_aspect_ratio};
use crate::trigger::DebouncedTrigger;

/// Which per-face measurement a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// Averaged eye aspect ratio (blink trigger).
    Eyes,
    /// Mouth aspect ratio (mouth trigger).
    Mouth,
}

/// A non-fatal problem encountered while processing a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureWarning {
    /// Position of the face in the frame's face list.
    pub face_index: usize,
    pub measurement: Measurement,
    pub error: GeometryError,
}

/// Ratios measured for one face. `None` where the measurement failed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceMeasurement {
    pub ear: Option<f64>,
    pub mar: Option<f64>,
}

/// Everything one call to [`GestureCoordinator::process_frame`] produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    /// Scroll commands completed this frame, in emission order.
    pub events: Vec<ScrollEvent>,
    /// Measurements that were skipped this frame.
    pub warnings: Vec<GestureWarning>,
    /// One entry per input face slot.
    pub measurements: Vec<FaceMeasurement>,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.warnings.is_empty() && self.measurements.is_empty()
    }
}

#[derive(Debug, Clone)]
struct TriggerPair {
    blink: DebouncedTrigger,
    mouth: DebouncedTrigger,
}

impl TriggerPair {
    fn new(config: &DetectionConfig) -> Self {
        Self {
            blink: DebouncedTrigger::new(config.eye_threshold, config.min_consecutive_frames),
            mouth: DebouncedTrigger::new(config.mouth_threshold, config.min_consecutive_frames),
        }
    }
}

/// Owns the gesture triggers and maps their pulses to scroll events.
#[derive(Debug, Clone)]
pub struct GestureCoordinator {
    config: DetectionConfig,
    /// One pair under [`FacePolicy::Shared`]; one per face position otherwise.
    pairs: Vec<TriggerPair>,
}

impl GestureCoordinator {
    /// Create a coordinator with idle triggers.
    pub fn new(config: DetectionConfig) -> Self {
        let pairs = vec![TriggerPair::new(&config)];
        Self { config, pairs }
    }

    /// Create a coordinator with default thresholds.
    pub fn with_defaults() -> Self {
        Self::new(DetectionConfig::default())
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Process one video frame's faces.
    ///
    /// An empty face list leaves every trigger untouched.
    pub fn process_frame(&mut self, faces: &[FaceLandmarks]) -> FrameReport {
        let mut report = FrameReport::default();
        for (face_index, face) in faces.iter().enumerate() {
            self.update_face(&mut report, face_index, face);
        }
        log_warnings(&report);
        report
    }

    /// Process a frame whose face list has unusable entries.
    ///
    /// `None` slots keep their position, so under [`FacePolicy::PerFace`]
    /// the faces after them still drive their own pairs and the pair at the
    /// empty position is left untouched. Every slot gets a measurement entry,
    /// empty for `None`.
    pub fn process_slots(&mut self, faces: &[Option<FaceLandmarks>]) -> FrameReport {
        let mut report = FrameReport::default();
        for (face_index, slot) in faces.iter().enumerate() {
            match slot {
                Some(face) => self.update_face(&mut report, face_index, face),
                None => report.measurements.push(FaceMeasurement::default()),
            }
        }
        log_warnings(&report);
        report
    }

    fn update_face(&mut self, report: &mut FrameReport, face_index: usize, face: &FaceLandmarks) {
        let magnitude = self.config.scroll_magnitude;
        let ear = measure_eyes(face);
        let mar = mouth_aspect_ratio(&face.mouth);
        let pair = self.pair_for(face_index);

        let mut measurement = FaceMeasurement::default();
        let mut blink_pulse = false;
        let mut mouth_pulse = false;

        match ear {
            Ok(ear) => {
                measurement.ear = Some(ear);
                blink_pulse = pair.blink.update(ear);
            }
            Err(error) => report.warnings.push(GestureWarning {
                face_index,
                measurement: Measurement::Eyes,
                error,
            }),
        }

        match mar {
            Ok(mar) => {
                measurement.mar = Some(mar);
                mouth_pulse = pair.mouth.update(mar);
            }
            Err(error) => report.warnings.push(GestureWarning {
                face_index,
                measurement: Measurement::Mouth,
                error,
            }),
        }

        if blink_pulse {
            tracing::debug!(face = face_index, ear = ?measurement.ear, "Blink completed");
            report.events.push(ScrollEvent::down(magnitude));
        }
        if mouth_pulse {
            tracing::debug!(
                face = face_index,
                mar = ?measurement.mar,
                "Mouth gesture completed"
            );
            report.events.push(ScrollEvent::up(magnitude));
        }

        report.measurements.push(measurement);
    }

    /// Blink trigger driven by the face at `face_index`, if one exists yet.
    pub fn blink_trigger(&self, face_index: usize) -> Option<&DebouncedTrigger> {
        self.pairs
            .get(self.pair_index(face_index))
            .map(|pair| &pair.blink)
    }

    /// Mouth trigger driven by the face at `face_index`, if one exists yet.
    pub fn mouth_trigger(&self, face_index: usize) -> Option<&DebouncedTrigger> {
        self.pairs
            .get(self.pair_index(face_index))
            .map(|pair| &pair.mouth)
    }

    /// Return every trigger to idle.
    pub fn reset(&mut self) {
        for pair in &mut self.pairs {
            pair.blink.reset();
            pair.mouth.reset();
        }
    }

    fn pair_index(&self, face_index: usize) -> usize {
        match self.config.face_policy {
            FacePolicy::Shared => 0,
            FacePolicy::PerFace => face_index,
        }
    }

    fn pair_for(&mut self, face_index: usize) -> &mut TriggerPair {
        let index = self.pair_index(face_index);
        while self.pairs.len() <= index {
            self.pairs.push(TriggerPair::new(&self.config));
        }
        &mut self.pairs[index]
    }
}

fn log_warnings(report: &FrameReport) {
    for warning in &report.warnings {
        tracing::warn!(
            face = warning.face_index,
            measurement = ?warning.measurement,
            error = %warning.error,
            "Skipping gesture update for this frame"
        );
    }
}

fn measure_eyes(face: &FaceLandmarks) -> Result<f64, GeometryError> {
    let left = eye_aspect_ratio(&face.left_eye)?;
    let right = eye_aspect_ratio(&face.right_eye)?;
    Ok((left + right) / 2.0)
}
