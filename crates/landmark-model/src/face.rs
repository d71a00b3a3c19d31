//! Per-face landmark regions.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::point::Point2D;

/// Number of points in an iBUG 300-W / dlib 68-point face shape.
pub const DLIB68_POINT_COUNT: usize = 68;

/// Subject's right eye within a 68-point shape.
pub const DLIB68_RIGHT_EYE: Range<usize> = 36..42;

/// Subject's left eye within a 68-point shape.
pub const DLIB68_LEFT_EYE: Range<usize> = 42..48;

/// Outer and inner lip contour within a 68-point shape.
pub const DLIB68_MOUTH: Range<usize> = 48..68;

/// Errors raised while turning raw landmark records into face regions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LandmarkError {
    #[error("{layout} shape needs {expected} points, got {actual}")]
    PointCount {
        layout: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// The landmark regions of one detected face.
///
/// Eye regions follow the six-point convention: points 0 and 3 are the
/// horizontal corners, {1, 5} and {2, 4} are the vertical pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub left_eye: Vec<Point2D>,
    pub right_eye: Vec<Point2D>,
    pub mouth: Vec<Point2D>,
}

impl FaceLandmarks {
    pub fn new(left_eye: Vec<Point2D>, right_eye: Vec<Point2D>, mouth: Vec<Point2D>) -> Self {
        Self {
            left_eye,
            right_eye,
            mouth,
        }
    }

    /// Split a full 68-point shape into eye and mouth regions.
    pub fn from_dlib68(shape: &[Point2D]) -> Result<Self, LandmarkError> {
        if shape.len() < DLIB68_POINT_COUNT {
            return Err(LandmarkError::PointCount {
                layout: "dlib68",
                expected: DLIB68_POINT_COUNT,
                actual: shape.len(),
            });
        }

        Ok(Self {
            left_eye: shape[DLIB68_LEFT_EYE].to_vec(),
            right_eye: shape[DLIB68_RIGHT_EYE].to_vec(),
            mouth: shape[DLIB68_MOUTH].to_vec(),
        })
    }
}

/// A face entry as it appears in a frame stream.
///
/// Producers either pre-split the regions or ship the whole 68-point shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaceRecord {
    Regions(FaceLandmarks),
    Dlib68 { dlib68: Vec<Point2D> },
}

impl FaceRecord {
    /// Resolve the record into eye and mouth regions.
    pub fn into_landmarks(self) -> Result<FaceLandmarks, LandmarkError> {
        match self {
            FaceRecord::Regions(face) => Ok(face),
            FaceRecord::Dlib68 { dlib68 } => FaceLandmarks::from_dlib68(&dlib68),
        }
    }
}

impl From<FaceLandmarks> for FaceRecord {
    fn from(face: FaceLandmarks) -> Self {
        FaceRecord::Regions(face)
    }
}
