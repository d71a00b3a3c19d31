//! BlinkScroll Gesture Core
//!
//! Turns per-frame facial landmarks into one-shot scroll commands:
//! - **Ratios:** Eye and mouth aspect ratios from landmark geometry
//! - **Triggers:** Debounced, release-edge state machines per gesture
//! - **Coordinator:** Feeds triggers each frame and maps pulses to scrolls
//!
//! This crate is pure computation: no I/O, no clocks, no platform access.
//! A closed-eye release scrolls down; a mouth release scrolls up.

pub mod coordinator;
pub mod error;
pub mod ratio;
pub mod trigger;

pub use coordinator::{
    FaceMeasurement, FrameReport, GestureCoordinator, GestureWarning, Measurement,
};
pub use error::{GeometryError, ShapeKind};
pub use ratio::{eye_aspect_ratio, mouth_aspect_ratio};
pub use trigger::{DebouncedTrigger, TriggerState};
