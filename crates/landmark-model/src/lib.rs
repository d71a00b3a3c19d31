//! BlinkScroll Landmark Model
//!
//! Defines the data contracts that flow around the gesture core:
//! - **Points:** 2D landmark coordinates in a shared image space
//! - **Faces:** Per-face eye and mouth landmark regions
//! - **Frames:** Timestamped landmark frames in JSONL stream form
//! - **Scroll events:** The abstract output of gesture detection
//!
//! Nothing here knows how landmarks were produced or how scroll events
//! are delivered to the operating system.

pub mod face;
pub mod frame;
pub mod point;
pub mod scroll;

pub use face::*;
pub use frame::*;
pub use point::*;
pub use scroll::*;
