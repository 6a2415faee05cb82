//! PSR Label Model
//!
//! Defines the core data contracts shared by the labeling tools:
//! - **States:** Tri-state per-component assembly status and fixed-length vectors
//! - **Snapshots:** Frame-tagged state vectors and the per-recording label sequence
//! - **Actions:** Install / mis-install / removal events derived from snapshots
//! - **Procedure:** The externally supplied action description table
//!
//! Action identifiers follow `component_index * 3 + transition_offset`,
//! which is the stable contract between recordings and procedure tables.

pub mod action;
pub mod csv;
pub mod error;
pub mod procedure;
pub mod snapshot;
pub mod state;

pub use action::*;
pub use error::*;
pub use procedure::*;
pub use snapshot::*;
pub use state::*;
