//! Input channels and the blocking read-eval loop.

use psr_common::error::PsrResult;
use psr_label_model::LabelSequence;

use crate::command::Command;
use crate::session::{LabelingSession, Notice, Step};

/// Source of operator commands for a labeling session.
///
/// Implementations block until the operator has decided on the next
/// command. Returning `None` means the channel is closed.
pub trait InputChannel {
    /// Wait for the next command.
    fn next_command(&mut self, session: &LabelingSession) -> PsrResult<Option<Command>>;

    /// Present the effect of the last command to the operator.
    fn present(&mut self, session: &LabelingSession, notices: &[Notice]) -> PsrResult<()>;

    /// Channel name for logging.
    fn name(&self) -> &str;
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// All frames were viewed; the labels should be saved.
    Completed(LabelSequence),
    /// Hard quit; nothing should be saved.
    Aborted,
    /// The channel closed before the session ended; nothing should be saved.
    InputClosed,
}

/// Drive `session` with commands from `channel` until it finishes or is
/// aborted.
pub fn run_session(
    mut session: LabelingSession,
    channel: &mut dyn InputChannel,
) -> PsrResult<SessionEnd> {
    tracing::info!(
        recording = %session.name(),
        frames = session.frames().len(),
        channel = %channel.name(),
        "Labeling session started"
    );

    loop {
        let Some(command) = channel.next_command(&session)? else {
            tracing::warn!(recording = %session.name(), "Input closed, discarding labels");
            return Ok(SessionEnd::InputClosed);
        };

        let outcome = session.handle(command);
        channel.present(&session, &outcome.notices)?;

        match outcome.step {
            Step::Continue => {}
            Step::Finished => {
                tracing::info!(
                    recording = %session.name(),
                    snapshots = session.labels().len(),
                    "Labeling session finished"
                );
                return Ok(SessionEnd::Completed(session.into_labels()));
            }
            Step::Aborted => return Ok(SessionEnd::Aborted),
        }
    }
}
