//! Abstract scroll commands emitted by gesture detection.

use serde::{Deserialize, Serialize};

/// Scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
}

/// A single scroll command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollEvent {
    pub direction: ScrollDirection,
    pub magnitude: u32,
}

impl ScrollEvent {
    pub fn up(magnitude: u32) -> Self {
        Self {
            direction: ScrollDirection::Up,
            magnitude,
        }
    }

    pub fn down(magnitude: u32) -> Self {
        Self {
            direction: ScrollDirection::Down,
            magnitude,
        }
    }

    /// Wheel amount in the usual injection convention: positive scrolls up,
    /// negative scrolls down.
    pub fn signed_amount(&self) -> i64 {
        match self.direction {
            ScrollDirection::Up => i64::from(self.magnitude),
            ScrollDirection::Down => -i64::from(self.magnitude),
        }
    }
}

impl std::fmt::Display for ScrollEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = match self.direction {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
        };
        write!(f, "scroll {dir} {}", self.magnitude)
    }
}
