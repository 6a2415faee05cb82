//! Line-oriented terminal front end.
//!
//! One command key per input line; edit mode and restart confirmation
//! are follow-up prompts. Generic over reader and writer so sessions can
//! be scripted.

use std::io::{BufRead, Write};

use psr_common::config::LabelingConfig;
use psr_common::error::PsrResult;
use psr_label_model::LabelSequence;

use crate::channel::InputChannel;
use crate::command::{Command, EditRequest, Key, HELP};
use crate::session::{LabelingSession, Notice};

/// Terminal input channel reading operator lines from `R` and writing
/// prompts and reports to `W`.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
    component_names: Vec<String>,
    fps: u32,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W, config: &LabelingConfig) -> Self {
        Self {
            input,
            output,
            component_names: (0..config.component_count)
                .map(|k| config.component_name(k))
                .collect(),
            fps: config.fps.max(1),
        }
    }

    /// Print the hotkey reference.
    pub fn print_help(&mut self) -> PsrResult<()> {
        writeln!(self.output, "hotkeys:")?;
        for (key, action) in HELP {
            writeln!(self.output, "  {key:<12} {action}")?;
        }
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> PsrResult<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> PsrResult<Option<String>> {
        write!(self.output, "{text}")?;
        self.read_line()
    }

    /// Edit mode: collect component/state pairs until a non-numeric index.
    fn read_edits(&mut self, components: usize) -> PsrResult<Option<Vec<EditRequest>>> {
        let mut edits = vec![];
        loop {
            let index_prompt = format!(
                "What is the index of the state change? (0-{}, anything else to finish): ",
                components.saturating_sub(1)
            );
            let Some(index) = self.prompt(&index_prompt)? else {
                return Ok(None);
            };
            let index = index.trim();
            if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
                return Ok(Some(edits));
            }
            let component = index.parse::<usize>().ok();

            let Some(value) = self.prompt(
                "What is the new state (-1: wrong, 0: not done (remove), 1: correctly done (install), q: ignore)? ",
            )?
            else {
                return Ok(None);
            };
            let value = value.trim();
            if value == "q" {
                writeln!(self.output, "Skipping this entry")?;
                continue;
            }
            match (component, value.parse::<i64>()) {
                (Some(component), Ok(value)) => edits.push(EditRequest::new(component, value)),
                (None, _) => writeln!(
                    self.output,
                    "**** -- CAUTION: Illegal index {index:?} attempted --> ignoring this entry"
                )?,
                (Some(component), Err(_)) => writeln!(
                    self.output,
                    "**** -- CAUTION: Illegal update {value:?} for index {component} attempted --> ignoring this entry"
                )?,
            }
        }
    }

    fn write_status(&mut self, session: &LabelingSession) -> PsrResult<()> {
        let text = render_status(session, &self.component_names);
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn write_labels(&mut self, labels: &LabelSequence) -> PsrResult<()> {
        self.output.write_all(format_labels(labels).as_bytes())?;
        writeln!(self.output)?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> InputChannel for LineConsole<R, W> {
    fn next_command(&mut self, session: &LabelingSession) -> PsrResult<Option<Command>> {
        loop {
            let cursor = session.cursor();
            let header = format!(
                "[{}] {}/{} ({:.1}s) {} > ",
                session.name(),
                cursor,
                session.frames().len(),
                cursor as f64 / self.fps as f64,
                session.current_frame_id(),
            );
            let Some(line) = self.prompt(&header)? else {
                return Ok(None);
            };

            let command = match Key::parse(&line) {
                None => {
                    writeln!(self.output, "Unknown command {:?}.", line.trim())?;
                    self.print_help()?;
                    continue;
                }
                Some(Key::Edit) => {
                    self.write_status(session)?;
                    match self.read_edits(session.working().len())? {
                        Some(edits) => Command::Edit(edits),
                        None => return Ok(None),
                    }
                }
                Some(Key::Restart) => {
                    let Some(answer) =
                        self.prompt("Are you sure you want to restart this recording? (y/n) ")?
                    else {
                        return Ok(None);
                    };
                    Command::Restart {
                        confirmed: answer.trim() == "y",
                    }
                }
                Some(Key::Tick) => Command::Tick,
                Some(Key::Forward) => Command::Forward,
                Some(Key::FastForward) => Command::FastForward,
                Some(Key::Back) => Command::Back,
                Some(Key::FastBack) => Command::FastBack,
                Some(Key::PrintLabels) => Command::PrintLabels,
                Some(Key::DeleteLast) => Command::DeleteLast,
                Some(Key::ShowName) => Command::ShowName,
                Some(Key::Abort) => Command::Abort,
            };
            return Ok(Some(command));
        }
    }

    fn present(&mut self, session: &LabelingSession, notices: &[Notice]) -> PsrResult<()> {
        for notice in notices {
            match notice {
                Notice::EditApplied {
                    component,
                    from,
                    to,
                } => {
                    let name = self
                        .component_names
                        .get(*component)
                        .cloned()
                        .unwrap_or_else(|| format!("({component})"));
                    writeln!(self.output, "  {name}: {from} -> {to}")?;
                }
                Notice::EditRedundant { component, state } => writeln!(
                    self.output,
                    "Ignoring entry: idx {component} already has status {state}!"
                )?,
                Notice::EditRejected { message } => writeln!(
                    self.output,
                    "**** -- CAUTION: {message} --> ignoring this entry"
                )?,
                Notice::SnapshotCommitted { frame } => {
                    writeln!(self.output, "Recorded new state at {frame}")?;
                    self.write_status(session)?;
                }
                Notice::NoChange => writeln!(self.output, "No change, nothing recorded.")?,
                Notice::SnapshotAmended { frame } => {
                    writeln!(self.output, "Updated state at {frame}")?;
                    self.write_status(session)?;
                }
                Notice::SnapshotReverted { frame } => {
                    writeln!(
                        self.output,
                        "State at {frame} matches the previous entry, removed it"
                    )?;
                    self.write_status(session)?;
                }
                Notice::CommitRejected { frame, previous } => writeln!(
                    self.output,
                    "**** -- CAUTION: {frame} comes before the last entry {previous}, move forward to record --> ignoring this change"
                )?,
                Notice::SnapshotDeleted { .. } => {
                    writeln!(self.output, "Removed last PSR entry. Now the labels are:")?;
                    self.write_labels(session.labels())?;
                }
                Notice::NothingToDelete => writeln!(
                    self.output,
                    "Nothing to delete: only the initial state is recorded."
                )?,
                Notice::PrintLabels => self.write_labels(session.labels())?,
                Notice::RecordingName { name } => {
                    writeln!(self.output, "Recording name = {name}")?;
                    if let Some(path) = session.frames().path(session.cursor()) {
                        writeln!(self.output, "Current frame: {}", path.display())?;
                    }
                }
                Notice::Restarted => {
                    writeln!(self.output, "Resetting all labels for this recording")?
                }
                Notice::RestartDeclined => writeln!(self.output, "Not resetting anything.")?,
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "line-console"
    }
}

/// One line per snapshot: `frame: \t states`.
pub fn format_labels(labels: &LabelSequence) -> String {
    let mut output = String::new();
    for snapshot in labels.iter() {
        output.push_str(&format!("{}: \t {}\n", snapshot.frame, snapshot.states));
    }
    output
}

/// Status panel: one line per component with its state marker.
pub fn render_status(session: &LabelingSession, component_names: &[String]) -> String {
    let mut output = String::new();
    for (k, state) in session.working().iter().enumerate() {
        let name = component_names
            .get(k)
            .cloned()
            .unwrap_or_else(|| format!("({k})"));
        output.push_str(&format!("{} - {name}\n", state.marker()));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::FrameList;
    use psr_label_model::StateVector;

    fn config() -> LabelingConfig {
        LabelingConfig {
            component_count: 3,
            component_names: vec!["base".into(), "chassis".into(), "pin".into()],
            ..LabelingConfig::default()
        }
    }

    fn session() -> LabelingSession {
        let names = (0..30).map(|i| format!("{i:06}.jpg")).collect();
        LabelingSession::new(
            "rec",
            FrameList::from_names("/data/rec", names),
            StateVector::absent(3),
            &config(),
        )
        .unwrap()
    }

    fn console(script: &str) -> LineConsole<&[u8], Vec<u8>> {
        LineConsole::new(script.as_bytes(), Vec::new(), &config())
    }

    #[test]
    fn test_keys_map_to_commands() {
        let s = session();
        let mut c = console("\nd\nz\nw\nx\ns\nq\n");
        let mut commands = vec![];
        while let Some(cmd) = c.next_command(&s).unwrap() {
            commands.push(cmd);
        }
        assert_eq!(
            commands,
            vec![
                Command::Tick,
                Command::Forward,
                Command::FastBack,
                Command::PrintLabels,
                Command::DeleteLast,
                Command::ShowName,
                Command::Abort,
            ]
        );
    }

    #[test]
    fn test_edit_mode_collects_until_non_numeric_index() {
        let s = session();
        let mut c = console("e\n0\n1\n2\nq\n9\n-1\n1\nbanana\ndone\n");
        let cmd = c.next_command(&s).unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Edit(vec![EditRequest::new(0, 1), EditRequest::new(9, -1)])
        );

        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Skipping this entry"));
        assert!(out.contains("Illegal update \"banana\""));
    }

    #[test]
    fn test_overlong_index_is_reported_verbatim() {
        let s = session();
        let mut c = console("e\n99999999999999999999999\n1\n1\n0\n\n");
        let cmd = c.next_command(&s).unwrap().unwrap();
        assert_eq!(cmd, Command::Edit(vec![EditRequest::new(1, 0)]));

        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Illegal index \"99999999999999999999999\""));
        assert!(!out.contains(&usize::MAX.to_string()));
    }

    #[test]
    fn test_restart_confirmation_and_unknown_keys() {
        let s = session();
        let mut c = console("k\nr\nn\nr\ny\n");
        assert_eq!(
            c.next_command(&s).unwrap(),
            Some(Command::Restart { confirmed: false })
        );
        assert_eq!(
            c.next_command(&s).unwrap(),
            Some(Command::Restart { confirmed: true })
        );
        assert_eq!(c.next_command(&s).unwrap(), None);

        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Unknown command \"k\""));
    }

    #[test]
    fn test_render_status_markers() {
        let mut s = session();
        s.apply_edits(&[EditRequest::new(0, 1), EditRequest::new(2, -1)]);
        let names: Vec<String> = (0..3).map(|k| config().component_name(k)).collect();
        let text = render_status(&s, &names);
        assert_eq!(
            text,
            ">  - (0) base\n   - (1) chassis\n!! - (2) pin\n"
        );
    }

    #[test]
    fn test_format_labels() {
        let mut s = session();
        s.apply_edits(&[EditRequest::new(1, 1)]);
        assert_eq!(
            format_labels(s.labels()),
            "000000.jpg: \t 0,1,0\n"
        );
    }
}
