//! Debounced, release-edge gesture trigger.
//!
//! A trigger watches one ratio per frame. While the ratio stays below the
//! threshold it counts consecutive frames; the frame the ratio comes back
//! up is the release. A release after at least `min_frames` active frames
//! produces a single pulse. Holding a gesture never re-fires.
//!
//! ```text
//!            r < threshold (counter += 1)
//!          ┌──────────────┐
//!          v              │
//!   Idle ──────────> Accumulating
//!    ^  r < threshold     │
//!    │                    │ r >= threshold
//!    └────────────────────┘ (pulse if counter >= min_frames; counter = 0)
//! ```

/// Trigger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// No active frames counted.
    Idle,
    /// At least one consecutive active frame counted.
    Accumulating,
}

/// Per-gesture debounce state machine.
#[derive(Debug, Clone)]
pub struct DebouncedTrigger {
    threshold: f64,
    min_frames: u32,
    counter: u32,
}

impl DebouncedTrigger {
    /// Create an idle trigger. `min_frames` below 1 is raised to 1.
    pub fn new(threshold: f64, min_frames: u32) -> Self {
        Self {
            threshold,
            min_frames: min_frames.max(1),
            counter: 0,
        }
    }

    /// Feed one frame's ratio. Returns `true` when this frame completes a
    /// gesture.
    ///
    /// A ratio that does not compare below the threshold (including NaN)
    /// counts as a release.
    pub fn update(&mut self, ratio: f64) -> bool {
        if ratio < self.threshold {
            self.counter = self.counter.saturating_add(1);
            return false;
        }

        let pulse = self.counter >= self.min_frames;
        self.counter = 0;
        pulse
    }

    pub fn state(&self) -> TriggerState {
        if self.counter == 0 {
            TriggerState::Idle
        } else {
            TriggerState::Accumulating
        }
    }

    /// Consecutive active frames counted so far.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn min_frames(&self) -> u32 {
        self.min_frames
    }

    /// Drop any accumulated frames without emitting.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
