//! Action events derived from consecutive snapshots.

use serde::{Deserialize, Serialize};

use crate::snapshot::FrameId;

/// Number of action identifiers reserved per component.
pub const ACTIONS_PER_COMPONENT: usize = 3;

/// Kind of a derived action, encoded as the transition offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Component completed / installed (offset 0).
    Completed,
    /// Component installed incorrectly (offset 1).
    Error,
    /// Component removed (offset 2).
    Removed,
}

impl TransitionKind {
    pub fn offset(self) -> usize {
        match self {
            Self::Completed => 0,
            Self::Error => 1,
            Self::Removed => 2,
        }
    }

    /// Action identifier for this kind of transition on `component`.
    pub fn action_id(self, component: usize) -> usize {
        component * ACTIONS_PER_COMPONENT + self.offset()
    }

    /// Inverse of [`TransitionKind::action_id`].
    pub fn decompose(action_id: usize) -> (usize, Self) {
        let kind = match action_id % ACTIONS_PER_COMPONENT {
            0 => Self::Completed,
            1 => Self::Error,
            _ => Self::Removed,
        };
        (action_id / ACTIONS_PER_COMPONENT, kind)
    }
}

/// How an action event was established.
///
/// Only directly observed transitions are produced by the translator;
/// the implied variant is reserved for events inferred without a
/// matching snapshot change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Confidence {
    Implied,
    Observed,
}

impl From<Confidence> for u8 {
    fn from(conf: Confidence) -> Self {
        match conf {
            Confidence::Implied => 0,
            Confidence::Observed => 1,
        }
    }
}

impl TryFrom<u8> for Confidence {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Implied),
            1 => Ok(Self::Observed),
            other => Err(format!("confidence must be 0 or 1 but is {other}")),
        }
    }
}

/// A single install / mis-install / removal event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    /// Frame of the snapshot in which the transition was observed.
    pub frame: FrameId,

    /// `component * 3 + transition offset`.
    #[serde(rename = "id")]
    pub action_id: usize,

    /// Human-readable description from the procedure table.
    pub description: String,

    #[serde(rename = "conf")]
    pub confidence: Confidence,
}

impl ActionEvent {
    /// Component index encoded in the action identifier.
    pub fn component(&self) -> usize {
        TransitionKind::decompose(self.action_id).0
    }

    pub fn kind(&self) -> TransitionKind {
        TransitionKind::decompose(self.action_id).1
    }
}
