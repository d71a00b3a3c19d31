//! Openness ratios from landmark geometry.
//!
//! # Eye aspect ratio
//!
//! With the six-point eye convention (0 and 3 horizontal corners,
//! {1, 5} and {2, 4} vertical pairs):
//!
//! ```text
//! EAR = (|p1 - p5| + |p2 - p4|) / (2 * |p0 - p3|)
//! ```
//!
//! # Mouth aspect ratio
//!
//! Height over width of the axis-aligned bounding box of the mouth
//! contour's convex hull. This tolerates landmark sets whose point count
//! or ordering differs between models.
//!
//! Lower values mean "more closed" for both ratios.

use blinkscroll_landmark_model::point::Point2D;

use crate::error::{GeometryError, ShapeKind};

/// Points required for an eye aspect ratio.
pub const EYE_POINT_COUNT: usize = 6;

/// Minimum points required for a mouth aspect ratio.
pub const MIN_MOUTH_POINTS: usize = 3;

/// Compute the eye aspect ratio of a six-point eye shape.
///
/// Only the first six points are read; extra points are ignored.
pub fn eye_aspect_ratio(eye: &[Point2D]) -> Result<f64, GeometryError> {
    if eye.len() < EYE_POINT_COUNT {
        return Err(GeometryError::InvalidShape {
            shape: ShapeKind::Eye,
            expected: EYE_POINT_COUNT,
            actual: eye.len(),
        });
    }

    let a = eye[1].distance_to(&eye[5]);
    let b = eye[2].distance_to(&eye[4]);
    let c = eye[0].distance_to(&eye[3]);

    if c == 0.0 {
        return Err(GeometryError::degenerate(
            ShapeKind::Eye,
            "horizontal corners coincide",
        ));
    }
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Err(GeometryError::degenerate(
            ShapeKind::Eye,
            format!("non-finite landmark distance (a={a}, b={b}, c={c})"),
        ));
    }

    let ear = (a + b) / (2.0 * c);
    if !ear.is_finite() {
        return Err(GeometryError::degenerate(
            ShapeKind::Eye,
            format!("non-finite aspect ratio ({ear})"),
        ));
    }
    Ok(ear)
}

/// Compute the mouth aspect ratio of a mouth contour.
pub fn mouth_aspect_ratio(mouth: &[Point2D]) -> Result<f64, GeometryError> {
    if mouth.len() < MIN_MOUTH_POINTS {
        return Err(GeometryError::InvalidShape {
            shape: ShapeKind::Mouth,
            expected: MIN_MOUTH_POINTS,
            actual: mouth.len(),
        });
    }
    if let Some(bad) = mouth.iter().find(|p| !p.is_finite()) {
        return Err(GeometryError::degenerate(
            ShapeKind::Mouth,
            format!("non-finite landmark ({}, {})", bad.x, bad.y),
        ));
    }

    let hull = convex_hull(mouth);
    let bounds = BoundingBox::of(&hull)
        .ok_or_else(|| GeometryError::degenerate(ShapeKind::Mouth, "empty hull"))?;

    let (width, height) = (bounds.width(), bounds.height());
    if width == 0.0 {
        return Err(GeometryError::degenerate(
            ShapeKind::Mouth,
            "bounding box has zero width",
        ));
    }
    if !(width.is_finite() && height.is_finite()) {
        return Err(GeometryError::degenerate(
            ShapeKind::Mouth,
            format!("bounding box overflows ({width} x {height})"),
        ));
    }

    let mar = height / width;
    if !mar.is_finite() {
        return Err(GeometryError::degenerate(
            ShapeKind::Mouth,
            format!("non-finite aspect ratio ({mar})"),
        ));
    }
    Ok(mar)
}

/// Axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounding box of a point set. `None` when the set is empty.
    pub fn of(points: &[Point2D]) -> Option<BoundingBox> {
        let first = points.first()?;
        let init = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points[1..].iter().fold(init, |b, p| BoundingBox {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Convex hull of a point set (Andrew's monotone chain).
///
/// Returns hull vertices counter-clockwise (in y-up axes) starting from the
/// lowest-x point, without collinear points. Inputs with fewer than three
/// distinct points are returned deduplicated and sorted.
pub fn convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<Point2D> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], &p) <= 0.0
        {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point2D> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], &p) <= 0.0
        {
            upper.pop();
        }
        upper.push(p);
    }

    // Each chain ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Z component of (a - o) x (b - o).
fn cross(o: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}
