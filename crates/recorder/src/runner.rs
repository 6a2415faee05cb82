//! Per-recording labeling: discover frames, run a session, save the labels.

use std::path::PathBuf;

use psr_common::config::AppConfig;
use psr_common::dataset::Recording;
use psr_common::error::PsrResult;
use psr_label_model::csv::write_snapshots;

use crate::channel::{run_session, InputChannel, SessionEnd};
use crate::frames::FrameList;
use crate::session::{initial_state, LabelingSession};

/// What happened to one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingOutcome {
    /// An output file already exists; the recording was not opened.
    AlreadyLabeled { path: PathBuf },
    /// The recording folder contains no frames.
    NoFrames,
    /// Labels were written.
    Saved { path: PathBuf, snapshots: usize },
    /// The operator quit; nothing was written.
    Discarded,
    /// Input ended mid-session; nothing was written.
    InputClosed,
}

/// Where the recorder writes labels for `recording`.
pub fn output_path(config: &AppConfig, recording: &Recording) -> PathBuf {
    config.dataset.save_dir.join(format!(
        "{}{}",
        recording.name, config.dataset.snapshot_suffix
    ))
}

/// Label one recording through `channel`.
pub fn label_recording(
    config: &AppConfig,
    recording: &Recording,
    channel: &mut dyn InputChannel,
) -> PsrResult<RecordingOutcome> {
    let path = output_path(config, recording);
    if path.exists() {
        tracing::info!(recording = %recording.name, "Recording already labeled");
        return Ok(RecordingOutcome::AlreadyLabeled { path });
    }

    let frames = FrameList::discover(&recording.path, &config.dataset.frame_extension)?;
    if frames.is_empty() {
        tracing::warn!(recording = %recording.name, "No frames found, skipping");
        return Ok(RecordingOutcome::NoFrames);
    }

    let initial = initial_state(&config.labeling, &recording.name);
    let session = LabelingSession::new(&recording.name, frames, initial, &config.labeling)?;

    match run_session(session, channel)? {
        SessionEnd::Completed(labels) => {
            write_snapshots(&path, labels.snapshots())?;
            tracing::info!(
                recording = %recording.name,
                path = %path.display(),
                snapshots = labels.len(),
                "Wrote PSR labels"
            );
            Ok(RecordingOutcome::Saved {
                path,
                snapshots: labels.len(),
            })
        }
        SessionEnd::Aborted => {
            tracing::info!(recording = %recording.name, "Labels discarded");
            Ok(RecordingOutcome::Discarded)
        }
        SessionEnd::InputClosed => Ok(RecordingOutcome::InputClosed),
    }
}
