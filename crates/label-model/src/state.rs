//! Per-component assembly states.
//!
//! Every tracked component of a procedure is in exactly one of three
//! states at any point in a recording. A [`StateVector`] holds one state per
//! component; position `k` refers to the same component for the whole
//! recording.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, LabelResult};

/// Tri-state status of a single component.
///
/// Serialized as the integers used in label files: `0`, `1`, `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum PartState {
    /// Not (or no longer) installed.
    #[default]
    Absent,
    /// Installed correctly.
    Installed,
    /// Installed incorrectly.
    Incorrect,
}

impl PartState {
    /// Integer code used in snapshot files.
    pub fn code(self) -> i8 {
        match self {
            Self::Absent => 0,
            Self::Installed => 1,
            Self::Incorrect => -1,
        }
    }

    /// Parse an integer code. Only `-1`, `0` and `1` are valid.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Absent),
            1 => Some(Self::Installed),
            -1 => Some(Self::Incorrect),
            _ => None,
        }
    }

    /// Drop error information: `Incorrect` becomes `Absent`.
    pub fn without_error(self) -> Self {
        match self {
            Self::Incorrect => Self::Absent,
            other => other,
        }
    }

    /// Short marker for status panels.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Absent => "  ",
            Self::Installed => "> ",
            Self::Incorrect => "!!",
        }
    }
}

impl TryFrom<i8> for PartState {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Self::from_code(code as i64)
            .ok_or_else(|| format!("state must be one of -1, 0, 1 but is {code}"))
    }
}

impl From<PartState> for i8 {
    fn from(state: PartState) -> Self {
        state.code()
    }
}

impl fmt::Display for PartState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result of applying a single manual edit to a [`StateVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The component changed state.
    Applied {
        component: usize,
        from: PartState,
        to: PartState,
    },
    /// The component already had the requested state; nothing was changed.
    Redundant { component: usize, state: PartState },
}

/// Fixed-length ordered record of component states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateVector(Vec<PartState>);

impl StateVector {
    /// All components absent.
    pub fn absent(len: usize) -> Self {
        Self(vec![PartState::Absent; len])
    }

    pub fn from_states(states: Vec<PartState>) -> Self {
        Self(states)
    }

    /// Build a vector from integer codes, rejecting anything outside `{-1, 0, 1}`.
    pub fn from_codes(codes: &[i64]) -> LabelResult<Self> {
        codes
            .iter()
            .enumerate()
            .map(|(k, &code)| {
                PartState::from_code(code).ok_or_else(|| {
                    LabelError::invalid_edit(format!(
                        "state {code} for component {k} is not one of -1, 0, 1"
                    ))
                })
            })
            .collect::<LabelResult<Vec<_>>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, component: usize) -> Option<PartState> {
        self.0.get(component).copied()
    }

    pub fn states(&self) -> &[PartState] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = PartState> + '_ {
        self.0.iter().copied()
    }

    /// Set `component` to the state encoded by `value`.
    ///
    /// Fails with [`LabelError::InvalidEdit`] if the component index is out
    /// of range or `value` is not a valid state code; the vector is left
    /// unchanged in that case. Setting a component to the state it already
    /// has is reported as [`EditOutcome::Redundant`] and not applied.
    pub fn apply_edit(&mut self, component: usize, value: i64) -> LabelResult<EditOutcome> {
        let len = self.len();
        let to = PartState::from_code(value).ok_or_else(|| {
            LabelError::invalid_edit(format!(
                "illegal state {value} for component {component} (expected -1, 0 or 1)"
            ))
        })?;
        let slot = self.0.get_mut(component).ok_or_else(|| {
            LabelError::invalid_edit(format!(
                "illegal component index {component} (expected 0..{len})"
            ))
        })?;

        let from = *slot;
        if from == to {
            return Ok(EditOutcome::Redundant {
                component,
                state: to,
            });
        }

        *slot = to;
        Ok(EditOutcome::Applied {
            component,
            from,
            to,
        })
    }

    /// Copy of this vector with every `Incorrect` mapped to `Absent`.
    pub fn without_errors(&self) -> Self {
        Self(self.0.iter().map(|s| s.without_error()).collect())
    }

    /// Indices of components whose state differs from `other`.
    pub fn changed_components<'a>(&'a self, other: &'a StateVector) -> impl Iterator<Item = usize> + 'a {
        self.0
            .iter()
            .zip(other.0.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(k, _)| k)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, state) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{state}")?;
        }
        Ok(())
    }
}
