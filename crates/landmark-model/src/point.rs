//! Landmark point type.
//!
//! Coordinates are whatever the landmark producer emits (pixels or
//! normalized units); ratios computed from them are dimensionless.

use serde::{Deserialize, Serialize};

/// A 2D landmark point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Uniformly scale the point about the origin.
    pub fn scaled(&self, factor: f64) -> Point2D {
        Point2D {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaled() {
        let p = Point2D::new(1.5, -2.0).scaled(2.0);
        assert_eq!(p, Point2D::new(3.0, -4.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Point2D::new(1.0, 2.0).is_finite());
        assert!(!Point2D::new(f64::NAN, 2.0).is_finite());
        assert!(!Point2D::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Point2D::new(0.5, 0.25)).unwrap();
        assert_eq!(json, r#"{"x":0.5,"y":0.25}"#);
    }
}
