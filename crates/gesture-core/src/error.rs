//! Geometry errors raised by ratio computation.

/// Which landmark shape a ratio was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Eye,
    Mouth,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Eye => f.write_str("eye"),
            ShapeKind::Mouth => f.write_str("mouth"),
        }
    }
}

/// A landmark shape that cannot produce a meaningful ratio.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("invalid {shape} shape: need at least {expected} points, got {actual}")]
    InvalidShape {
        shape: ShapeKind,
        expected: usize,
        actual: usize,
    },

    #[error("degenerate {shape} geometry: {reason}")]
    DegenerateGeometry { shape: ShapeKind, reason: String },
}

impl GeometryError {
    pub fn degenerate(shape: ShapeKind, reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            shape,
            reason: reason.into(),
        }
    }

    /// The shape the error was raised for.
    pub fn shape(&self) -> ShapeKind {
        match self {
            Self::InvalidShape { shape, .. } | Self::DegenerateGeometry { shape, .. } => *shape,
        }
    }
}
