//! The labeling session state machine.
//!
//! A session owns the frame pointer, the working state vector, and the
//! recording's label sequence. Every operator command goes through
//! [`LabelingSession::handle`], which returns what happened as a list of
//! [`Notice`]s and whether the session continues.

use psr_common::config::LabelingConfig;
use psr_common::error::{PsrError, PsrResult};
use psr_label_model::{
    Commit, EditOutcome, FrameId, LabelError, LabelSequence, PartState, Snapshot, StateVector,
};

use crate::command::{Command, EditRequest};
use crate::frames::FrameList;

/// Whether the session keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Played past the last frame: labels are ready to be saved.
    Finished,
    /// Hard quit: labels must be discarded.
    Aborted,
}

/// Operator-facing report of a command's effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EditApplied {
        component: usize,
        from: PartState,
        to: PartState,
    },
    /// The component already had the requested state.
    EditRedundant { component: usize, state: PartState },
    /// Illegal component index or state value; nothing changed.
    EditRejected { message: String },
    SnapshotCommitted { frame: FrameId },
    /// The latest snapshot was on the current frame and was updated.
    SnapshotAmended { frame: FrameId },
    /// The change undid the latest snapshot, which was removed.
    SnapshotReverted { frame: FrameId },
    /// Edit mode ended without changing the state vector.
    NoChange,
    /// The current frame comes before the latest snapshot; the edits were
    /// rolled back.
    CommitRejected { frame: FrameId, previous: FrameId },
    SnapshotDeleted { remaining: usize },
    NothingToDelete,
    PrintLabels,
    RecordingName { name: String },
    Restarted,
    RestartDeclined,
}

/// Result of handling one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub step: Step,
    pub notices: Vec<Notice>,
}

impl Outcome {
    fn cont(notices: Vec<Notice>) -> Self {
        Self {
            step: Step::Continue,
            notices,
        }
    }
}

/// Interactive labeling state for one recording.
#[derive(Debug, Clone)]
pub struct LabelingSession {
    name: String,
    frames: FrameList,
    cursor: usize,
    initial: StateVector,
    working: StateVector,
    labels: LabelSequence,
    step: usize,
    fast_step: usize,
}

impl LabelingSession {
    /// Start a session on the first frame with `initial` as the first snapshot.
    pub fn new(
        name: impl Into<String>,
        frames: FrameList,
        initial: StateVector,
        config: &LabelingConfig,
    ) -> PsrResult<Self> {
        let name = name.into();
        let first = frames
            .name(0)
            .ok_or_else(|| PsrError::dataset(format!("recording '{name}' has no frames")))?
            .to_string();
        if initial.len() != config.component_count {
            return Err(PsrError::config(format!(
                "initial state has {} components, expected {}",
                initial.len(),
                config.component_count
            )));
        }

        Ok(Self {
            name,
            frames,
            cursor: 0,
            labels: LabelSequence::new(Snapshot::new(first, initial.clone())),
            working: initial.clone(),
            initial,
            step: config.step.max(1),
            fast_step: config.fast_step().max(1),
        })
    }

    /// Apply one operator command.
    pub fn handle(&mut self, command: Command) -> Outcome {
        match command {
            Command::Tick => {
                if self.cursor >= self.frames.last_index() {
                    tracing::debug!(recording = %self.name, "Reached the last frame");
                    return Outcome {
                        step: Step::Finished,
                        notices: vec![],
                    };
                }
                self.cursor += 1;
                Outcome::cont(vec![])
            }
            Command::Forward => self.advance(self.step),
            Command::FastForward => self.advance(self.fast_step),
            Command::Back => self.retreat(self.step),
            Command::FastBack => self.retreat(self.fast_step),
            Command::Edit(edits) => Outcome::cont(self.apply_edits(&edits)),
            Command::PrintLabels => Outcome::cont(vec![Notice::PrintLabels]),
            Command::DeleteLast => Outcome::cont(vec![self.delete_last()]),
            Command::ShowName => Outcome::cont(vec![Notice::RecordingName {
                name: self.name.clone(),
            }]),
            Command::Restart { confirmed: false } => Outcome::cont(vec![Notice::RestartDeclined]),
            Command::Restart { confirmed: true } => {
                self.restart();
                Outcome::cont(vec![Notice::Restarted])
            }
            Command::Abort => {
                tracing::info!(recording = %self.name, "Hard quit requested");
                Outcome {
                    step: Step::Aborted,
                    notices: vec![],
                }
            }
        }
    }

    fn advance(&mut self, by: usize) -> Outcome {
        self.cursor = self
            .cursor
            .saturating_add(by)
            .min(self.frames.last_index());
        Outcome::cont(vec![])
    }

    fn retreat(&mut self, by: usize) -> Outcome {
        self.cursor = self.cursor.saturating_sub(by);
        Outcome::cont(vec![])
    }

    /// Apply `edits` to the working vector, then commit it at the current
    /// frame if it changed.
    pub fn apply_edits(&mut self, edits: &[EditRequest]) -> Vec<Notice> {
        let before = self.working.clone();
        let mut notices = vec![];

        for edit in edits {
            let notice = match self.working.apply_edit(edit.component, edit.value) {
                Ok(EditOutcome::Applied {
                    component,
                    from,
                    to,
                }) => Notice::EditApplied {
                    component,
                    from,
                    to,
                },
                Ok(EditOutcome::Redundant { component, state }) => {
                    Notice::EditRedundant { component, state }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring illegal edit");
                    Notice::EditRejected {
                        message: e.to_string(),
                    }
                }
            };
            notices.push(notice);
        }

        let frame = self.current_frame_id();
        let notice = match self.labels.commit_if_changed(frame.clone(), &before, &self.working) {
            Ok(Commit::Unchanged) => Notice::NoChange,
            Ok(Commit::Appended) => {
                tracing::debug!(recording = %self.name, frame = %frame, "Recorded snapshot");
                Notice::SnapshotCommitted { frame }
            }
            Ok(Commit::Amended) => {
                tracing::debug!(recording = %self.name, frame = %frame, "Amended snapshot");
                Notice::SnapshotAmended { frame }
            }
            Ok(Commit::Reverted) => {
                tracing::debug!(recording = %self.name, frame = %frame, "Snapshot undone");
                Notice::SnapshotReverted { frame }
            }
            Err(LabelError::FrameOrder { frame, previous }) => {
                tracing::warn!(frame = %frame, previous = %previous, "Rejected snapshot before the latest one");
                self.working = before;
                Notice::CommitRejected { frame, previous }
            }
            Err(e) => {
                self.working = before;
                Notice::EditRejected {
                    message: e.to_string(),
                }
            }
        };
        notices.push(notice);
        notices
    }

    fn delete_last(&mut self) -> Notice {
        match self.labels.delete_last() {
            Ok(restored) => {
                self.working = restored.clone();
                Notice::SnapshotDeleted {
                    remaining: self.labels.len(),
                }
            }
            Err(_) => Notice::NothingToDelete,
        }
    }

    fn restart(&mut self) {
        tracing::info!(recording = %self.name, "Resetting all labels for this recording");
        let first = self.labels.initial().frame.clone();
        self.cursor = 0;
        self.labels = LabelSequence::new(Snapshot::new(first, self.initial.clone()));
        self.working = self.initial.clone();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based index of the frame being viewed.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn frames(&self) -> &FrameList {
        &self.frames
    }

    pub fn current_frame_id(&self) -> FrameId {
        FrameId::new(self.frames.name(self.cursor).unwrap_or_default())
    }

    pub fn working(&self) -> &StateVector {
        &self.working
    }

    pub fn labels(&self) -> &LabelSequence {
        &self.labels
    }

    pub fn into_labels(self) -> LabelSequence {
        self.labels
    }
}

/// Initial state vector for `recording_name`: the first matching configured
/// rule, otherwise all components absent.
pub fn initial_state(config: &LabelingConfig, recording_name: &str) -> StateVector {
    match config.initial_rule_for(recording_name) {
        Some(rule) => {
            tracing::debug!(pattern = %rule.pattern, "Initial state from name rule");
            rule.states.clone()
        }
        None => {
            if !config.initial_states.is_empty() {
                tracing::warn!(
                    recording = %recording_name,
                    "Could not initialize state based on recording name, starting all absent"
                );
            }
            StateVector::absent(config.component_count)
        }
    }
}
