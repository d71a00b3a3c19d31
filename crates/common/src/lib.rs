//! BlinkScroll Common Utilities
//!
//! Shared infrastructure for all BlinkScroll crates:
//! - Error types and result aliases
//! - Tracing/logging initialization
//! - Configuration loading (detection thresholds, logging)

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
