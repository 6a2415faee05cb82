//! Snapshot-sequence to action-event translation.
//!
//! # Algorithm
//!
//! 1. **Project** (optional): map `Incorrect` to `Absent` in both vectors of
//!    each pair, discarding error information before diffing.
//! 2. **Diff** every consecutive snapshot pair component by component.
//! 3. **Classify** each change through the transition table.
//! 4. **Emit** one event per classified change, stamped with the later
//!    snapshot's frame and described by the procedure table.

use std::borrow::Cow;

use psr_label_model::{
    ActionEvent, Confidence, FrameId, LabelError, LabelResult, ProcedureInfo, Snapshot,
    StateVector, TransitionKind,
};

use crate::transition::{classify, is_unexpected};

/// Configuration for the translator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Keep `Incorrect` states. When false they are treated as `Absent`.
    pub include_errors: bool,
}

/// Events derived from one recording.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// Events in frame order, then component order.
    pub events: Vec<ActionEvent>,

    /// Number of events classified as errors (transition offset 1).
    pub error_count: usize,

    /// Number of `Installed -> Incorrect` transitions seen.
    pub unexpected_count: usize,
}

/// The transition translator.
pub struct Translator<'a> {
    procedure: &'a ProcedureInfo,
    config: TranslatorConfig,
}

impl<'a> Translator<'a> {
    pub fn new(procedure: &'a ProcedureInfo, config: TranslatorConfig) -> Self {
        Self { procedure, config }
    }

    /// Translate an ordered snapshot sequence into action events.
    ///
    /// Fails with [`LabelError::UnknownAction`] if an emitted action has no
    /// procedure entry, with [`LabelError::LengthMismatch`] if two snapshots
    /// have vectors of different length, and with [`LabelError::FrameOrder`]
    /// if frames are not strictly increasing.
    pub fn translate(&self, snapshots: &[Snapshot]) -> LabelResult<Translation> {
        let mut translation = Translation::default();

        for pair in snapshots.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            if prev.states.len() != curr.states.len() {
                return Err(LabelError::LengthMismatch {
                    frame: curr.frame.clone(),
                    expected: prev.states.len(),
                    found: curr.states.len(),
                });
            }
            if curr.frame <= prev.frame {
                return Err(LabelError::FrameOrder {
                    frame: curr.frame.clone(),
                    previous: prev.frame.clone(),
                });
            }

            let (prev_states, curr_states) = self.project(&prev.states, &curr.states);
            self.diff_pair(&prev_states, &curr_states, &curr.frame, &mut translation)?;
        }

        tracing::debug!(
            snapshots = snapshots.len(),
            events = translation.events.len(),
            errors = translation.error_count,
            "Translated snapshot sequence"
        );
        Ok(translation)
    }

    fn project<'v>(
        &self,
        prev: &'v StateVector,
        curr: &'v StateVector,
    ) -> (Cow<'v, StateVector>, Cow<'v, StateVector>) {
        if self.config.include_errors {
            (Cow::Borrowed(prev), Cow::Borrowed(curr))
        } else {
            (
                Cow::Owned(prev.without_errors()),
                Cow::Owned(curr.without_errors()),
            )
        }
    }

    fn diff_pair(
        &self,
        prev: &StateVector,
        curr: &StateVector,
        frame: &FrameId,
        out: &mut Translation,
    ) -> LabelResult<()> {
        for (k, (p, c)) in prev.iter().zip(curr.iter()).enumerate() {
            let Some(kind) = classify(p, c) else {
                continue;
            };

            if is_unexpected(p, c) {
                tracing::warn!(
                    frame = %frame,
                    component = k,
                    "Did not expect a transition from installed to incorrect"
                );
                out.unexpected_count += 1;
            }
            if kind == TransitionKind::Error {
                out.error_count += 1;
            }

            let action_id = kind.action_id(k);
            let description = self.procedure.description(action_id)?;
            out.events.push(ActionEvent {
                frame: frame.clone(),
                action_id,
                description: description.to_string(),
                confidence: Confidence::Observed,
            });
        }
        Ok(())
    }
}

/// Translate `snapshots` with the given procedure table.
pub fn translate(
    snapshots: &[Snapshot],
    procedure: &ProcedureInfo,
    include_errors: bool,
) -> LabelResult<Translation> {
    Translator::new(procedure, TranslatorConfig { include_errors }).translate(snapshots)
}
