//! Per-component transition table.
//!
//! | prev \ curr | Absent    | Installed | Incorrect |
//! |-------------|-----------|-----------|-----------|
//! | Absent      | -         | Completed | Error     |
//! | Installed   | Removed   | -         | Error (*) |
//! | Incorrect   | -         | Completed | -         |
//!
//! (*) accepted but unexpected: a correct install turning wrong.

use psr_label_model::{PartState, TransitionKind};

/// Classify a single component's change between two snapshots.
///
/// Returns `None` when the change does not produce an action, including
/// `Incorrect -> Absent`: undoing a wrong install is not a completed step.
pub fn classify(prev: PartState, curr: PartState) -> Option<TransitionKind> {
    use PartState::*;

    match (prev, curr) {
        (Absent, Installed) | (Incorrect, Installed) => Some(TransitionKind::Completed),
        (Absent, Incorrect) | (Installed, Incorrect) => Some(TransitionKind::Error),
        (Installed, Absent) => Some(TransitionKind::Removed),
        (Incorrect, Absent) => None,
        (Absent, Absent) | (Installed, Installed) | (Incorrect, Incorrect) => None,
    }
}

/// Transitions that are emitted but flagged as unexpected.
pub fn is_unexpected(prev: PartState, curr: PartState) -> bool {
    prev == PartState::Installed && curr == PartState::Incorrect
}
