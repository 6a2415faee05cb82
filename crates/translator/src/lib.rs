//! PSR Transition Translator
//!
//! Converts a recording's ordered state snapshots into discrete action
//! events:
//! - **Transition table:** classify each per-component state change
//! - **Error projection:** optionally collapse `Incorrect` into `Absent`
//! - **Translation:** diff every consecutive snapshot pair into events
//!
//! This crate is pure computation: no I/O, no interaction. All inputs are
//! data; all outputs are data.

pub mod transition;
pub mod translate;

pub use transition::classify;
pub use translate::{translate, Translation, Translator, TranslatorConfig};
