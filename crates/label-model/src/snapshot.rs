//! Frame-tagged state snapshots and the per-recording label sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, LabelResult};
use crate::state::StateVector;

/// Recording-relative frame reference (a frame filename or an integer index).
///
/// Kept verbatim as written in label files. Ordering is lexicographic,
/// matching the sorted order of zero-padded frame filenames.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(String);

impl FrameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FrameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FrameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<usize> for FrameId {
    fn from(index: usize) -> Self {
        Self(index.to_string())
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A state vector observed at a specific frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: FrameId,
    pub states: StateVector,
}

impl Snapshot {
    pub fn new(frame: impl Into<FrameId>, states: StateVector) -> Self {
        Self {
            frame: frame.into(),
            states,
        }
    }
}

/// What [`LabelSequence::commit_if_changed`] did with a new vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// `after` equals `before`; nothing recorded.
    Unchanged,
    /// A new snapshot was appended at a later frame.
    Appended,
    /// The latest snapshot was on the same frame and now holds `after`.
    Amended,
    /// The latest snapshot was on the same frame and `after` equals the
    /// snapshot before it, so the latest snapshot was dropped.
    Reverted,
}

/// Ordered snapshots for one recording.
///
/// The first snapshot is the recording's initial state and is never
/// removed. Frames are strictly increasing and neighbouring snapshots
/// always differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSequence {
    snapshots: Vec<Snapshot>,
}

impl LabelSequence {
    /// Start a sequence from the recording's initial state.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            snapshots: vec![initial],
        }
    }

    /// Wrap loaded snapshots. Fails if there is no initial snapshot or the
    /// frames are not strictly increasing.
    pub fn from_snapshots(snapshots: Vec<Snapshot>) -> LabelResult<Self> {
        if snapshots.is_empty() {
            return Err(LabelError::malformed(
                0,
                "label sequence needs at least an initial snapshot",
            ));
        }
        if let Some(pair) = snapshots.windows(2).find(|p| p[1].frame <= p[0].frame) {
            return Err(LabelError::FrameOrder {
                frame: pair[1].frame.clone(),
                previous: pair[0].frame.clone(),
            });
        }
        Ok(Self { snapshots })
    }

    /// Record `after` at `frame` if it differs from `before`.
    ///
    /// A later frame appends a snapshot. The frame of the latest snapshot
    /// amends it in place, or drops it when `after` matches the snapshot
    /// before it; the initial snapshot is amended, never dropped. An
    /// earlier frame fails with [`LabelError::FrameOrder`] and leaves the
    /// sequence untouched.
    pub fn commit_if_changed(
        &mut self,
        frame: impl Into<FrameId>,
        before: &StateVector,
        after: &StateVector,
    ) -> LabelResult<Commit> {
        if after == before {
            return Ok(Commit::Unchanged);
        }

        let frame = frame.into();
        let last = self.last();
        if frame < last.frame {
            return Err(LabelError::FrameOrder {
                frame,
                previous: last.frame.clone(),
            });
        }
        if frame > last.frame {
            self.snapshots.push(Snapshot::new(frame, after.clone()));
            return Ok(Commit::Appended);
        }

        let n = self.snapshots.len();
        if n > 1 && self.snapshots[n - 2].states == *after {
            self.snapshots.pop();
            return Ok(Commit::Reverted);
        }
        self.snapshots[n - 1].states = after.clone();
        Ok(Commit::Amended)
    }

    /// Remove the latest snapshot and return the state vector that is now
    /// current. The initial snapshot cannot be removed.
    pub fn delete_last(&mut self) -> LabelResult<&StateVector> {
        if self.snapshots.len() <= 1 {
            return Err(LabelError::NothingToDelete);
        }
        self.snapshots.pop();
        Ok(&self.last().states)
    }

    pub fn initial(&self) -> &Snapshot {
        &self.snapshots[0]
    }

    pub fn last(&self) -> &Snapshot {
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vector(codes: &[i64]) -> StateVector {
        StateVector::from_codes(codes).unwrap()
    }

    #[test]
    fn test_commit_only_on_change() {
        let mut seq = LabelSequence::new(Snapshot::new("000.jpg", vector(&[0, 0])));
        let before = vector(&[0, 0]);

        assert_eq!(
            seq.commit_if_changed("010.jpg", &before, &before.clone()).unwrap(),
            Commit::Unchanged
        );
        assert_eq!(seq.len(), 1);

        assert_eq!(
            seq.commit_if_changed("020.jpg", &before, &vector(&[1, 0])).unwrap(),
            Commit::Appended
        );
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.last().frame.as_str(), "020.jpg");
    }

    #[test]
    fn test_commit_on_same_frame_amends_latest_snapshot() {
        let mut seq = LabelSequence::new(Snapshot::new("000.jpg", vector(&[0, 0])));

        let amended = seq.commit_if_changed("000.jpg", &vector(&[0, 0]), &vector(&[1, 0]));
        assert_eq!(amended.unwrap(), Commit::Amended);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.initial().states, vector(&[1, 0]));

        seq.commit_if_changed("010.jpg", &vector(&[1, 0]), &vector(&[1, 1]))
            .unwrap();
        let amended = seq.commit_if_changed("010.jpg", &vector(&[1, 1]), &vector(&[1, -1]));
        assert_eq!(amended.unwrap(), Commit::Amended);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.last().states, vector(&[1, -1]));
    }

    #[test]
    fn test_commit_on_same_frame_back_to_predecessor_reverts() {
        let mut seq = LabelSequence::new(Snapshot::new("000.jpg", vector(&[0, 0])));
        seq.commit_if_changed("010.jpg", &vector(&[0, 0]), &vector(&[1, 0]))
            .unwrap();

        let reverted = seq.commit_if_changed("010.jpg", &vector(&[1, 0]), &vector(&[0, 0]));
        assert_eq!(reverted.unwrap(), Commit::Reverted);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.last().frame.as_str(), "000.jpg");
    }

    #[test]
    fn test_commit_on_earlier_frame_is_rejected() {
        let mut seq = LabelSequence::new(Snapshot::new("000.jpg", vector(&[0])));
        seq.commit_if_changed("020.jpg", &vector(&[0]), &vector(&[1]))
            .unwrap();

        let err = seq
            .commit_if_changed("010.jpg", &vector(&[1]), &vector(&[0]))
            .unwrap_err();
        assert!(matches!(err, LabelError::FrameOrder { .. }));
        assert!(err.is_user_correctable());
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.last().states, vector(&[1]));
    }

    #[test]
    fn test_delete_last_restores_previous_vector() {
        let mut seq = LabelSequence::new(Snapshot::new("000.jpg", vector(&[0, 0])));
        seq.commit_if_changed("010.jpg", &vector(&[0, 0]), &vector(&[1, 0]))
            .unwrap();
        seq.commit_if_changed("020.jpg", &vector(&[1, 0]), &vector(&[1, 1]))
            .unwrap();

        let restored = seq.delete_last().unwrap().clone();
        assert_eq!(restored, vector(&[1, 0]));
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_delete_last_never_removes_initial_snapshot() {
        let mut seq = LabelSequence::new(Snapshot::new("000.jpg", vector(&[0])));
        let err = seq.delete_last().unwrap_err();
        assert!(matches!(err, LabelError::NothingToDelete));
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.initial().frame.as_str(), "000.jpg");
    }

    #[test]
    fn test_from_snapshots_requires_initial_and_increasing_frames() {
        assert!(LabelSequence::from_snapshots(vec![]).is_err());

        let repeated = vec![
            Snapshot::new("000.jpg", vector(&[0])),
            Snapshot::new("000.jpg", vector(&[1])),
        ];
        assert!(matches!(
            LabelSequence::from_snapshots(repeated),
            Err(LabelError::FrameOrder { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_committed_sequences_stay_ordered_and_distinct(
            edits in prop::collection::vec(
                (0usize..6, 0usize..4, prop::sample::select(vec![-1i64, 0, 1])),
                0..40,
            )
        ) {
            let mut working = StateVector::absent(4);
            let mut seq = LabelSequence::new(Snapshot::new("000", working.clone()));
            for (frame, component, value) in edits {
                let before = working.clone();
                working.apply_edit(component, value).unwrap();
                if seq.commit_if_changed(format!("{frame:03}"), &before, &working).is_err() {
                    working = before;
                }
                prop_assert_eq!(&seq.last().states, &working);
            }
            for pair in seq.snapshots().windows(2) {
                prop_assert_ne!(&pair[0].states, &pair[1].states);
                prop_assert!(pair[0].frame < pair[1].frame);
            }
        }
    }
}
