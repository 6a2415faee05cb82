//! PSR Common Utilities
//!
//! Shared infrastructure for the PSR labeling crates:
//! - Error types and result aliases
//! - Configuration loading and validation
//! - Dataset split and recording discovery
//! - Tracing/logging initialization

pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;

pub use config::*;
pub use dataset::*;
pub use error::*;
