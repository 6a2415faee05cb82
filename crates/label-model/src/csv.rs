//! Header-less CSV formats for snapshots and action events.
//!
//! Snapshot rows: `frame,state_0,...,state_{N-1}` with states in `{-1, 0, 1}`.
//! Action rows: `frame,action_id,description`.

use std::path::Path;

use crate::action::ActionEvent;
use crate::error::{LabelError, LabelResult};
use crate::snapshot::{FrameId, Snapshot};
use crate::state::{PartState, StateVector};

/// Parse snapshot rows.
///
/// Every row must carry the same number of states. When `expected_len` is
/// given, rows must match it; otherwise the first row sets the length.
/// Frames must be strictly increasing. Blank lines are skipped.
pub fn parse_snapshots(content: &str, expected_len: Option<usize>) -> LabelResult<Vec<Snapshot>> {
    let mut width = expected_len;
    let mut snapshots: Vec<Snapshot> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(',');
        let frame = fields.next().unwrap_or_default().trim();
        if frame.is_empty() {
            return Err(LabelError::malformed(line_no, "missing frame identifier"));
        }

        let states = fields
            .enumerate()
            .map(|(k, field)| parse_state(field, k, line_no))
            .collect::<LabelResult<Vec<_>>>()?;

        if states.is_empty() {
            return Err(LabelError::malformed(line_no, "row has no states"));
        }
        match width {
            Some(n) if n != states.len() => {
                return Err(LabelError::malformed(
                    line_no,
                    format!("expected {n} states but found {}", states.len()),
                ));
            }
            Some(_) => {}
            None => width = Some(states.len()),
        }

        let frame = FrameId::new(frame);
        if let Some(last) = snapshots.last() {
            if frame <= last.frame {
                return Err(LabelError::malformed(
                    line_no,
                    format!("frame {frame} does not come after {}", last.frame),
                ));
            }
        }

        snapshots.push(Snapshot::new(frame, StateVector::from_states(states)));
    }

    Ok(snapshots)
}

fn parse_state(field: &str, component: usize, line_no: usize) -> LabelResult<PartState> {
    let field = field.trim();
    let code: i64 = field.parse().map_err(|_| {
        LabelError::malformed(
            line_no,
            format!("state {component} is not numeric: {field:?}"),
        )
    })?;
    PartState::from_code(code).ok_or_else(|| {
        LabelError::malformed(
            line_no,
            format!("state {component} must be -1, 0 or 1 but is {code}"),
        )
    })
}

/// Serialize snapshots, one row per snapshot.
pub fn serialize_snapshots(snapshots: &[Snapshot]) -> String {
    let mut output = String::new();
    for snapshot in snapshots {
        output.push_str(snapshot.frame.as_str());
        output.push(',');
        output.push_str(&snapshot.states.to_string());
        output.push('\n');
    }
    output
}

/// Serialize action events, one row per event. Confidence is not written.
pub fn serialize_actions(events: &[ActionEvent]) -> String {
    let mut output = String::new();
    for event in events {
        output.push_str(&format!(
            "{},{},{}\n",
            event.frame, event.action_id, event.description
        ));
    }
    output
}

/// Read and parse a snapshot file.
pub fn read_snapshots(path: impl AsRef<Path>, expected_len: Option<usize>) -> LabelResult<Vec<Snapshot>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| LabelError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_snapshots(&content, expected_len)
}

pub fn write_snapshots(path: impl AsRef<Path>, snapshots: &[Snapshot]) -> LabelResult<()> {
    write_file(path.as_ref(), &serialize_snapshots(snapshots))
}

pub fn write_actions(path: impl AsRef<Path>, events: &[ActionEvent]) -> LabelResult<()> {
    write_file(path.as_ref(), &serialize_actions(events))
}

fn write_file(path: &Path, content: &str) -> LabelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LabelError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, content).map_err(|e| LabelError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Confidence;

    #[test]
    fn test_parse_snapshot_rows() {
        let content = "000000.jpg,1,0,0\n000130.jpg,1,1,0\r\n\n000245.jpg,1,1,-1\n";
        let snapshots = parse_snapshots(content, None).unwrap();
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[1].frame.as_str(), "000130.jpg");
        assert_eq!(snapshots[2].states.to_string(), "1,1,-1");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = parse_snapshots("a,0,0\nb,0,0,1\n", None).unwrap_err();
        match err {
            LabelError::MalformedSnapshot { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("expected 2 states"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert!(parse_snapshots("a,0,0\n", Some(3)).is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_and_out_of_domain_states() {
        assert!(matches!(
            parse_snapshots("a,0,x\n", None),
            Err(LabelError::MalformedSnapshot { line: 1, .. })
        ));
        assert!(matches!(
            parse_snapshots("a,0,0\nb,0,2\n", None),
            Err(LabelError::MalformedSnapshot { line: 2, .. })
        ));
        assert!(parse_snapshots(",0,0\n", None).is_err());
        assert!(parse_snapshots("a\n", None).is_err());
    }

    #[test]
    fn test_snapshot_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rec_PSR_labels.csv");
        let snapshots = vec![
            Snapshot::new("000.jpg", StateVector::from_codes(&[0, 0, 0]).unwrap()),
            Snapshot::new("010.jpg", StateVector::from_codes(&[1, 0, 0]).unwrap()),
            Snapshot::new("020.jpg", StateVector::from_codes(&[1, -1, 0]).unwrap()),
        ];

        write_snapshots(&path, &snapshots).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "000.jpg,0,0,0\n010.jpg,1,0,0\n020.jpg,1,-1,0\n"
        );
        assert_eq!(read_snapshots(&path, Some(3)).unwrap(), snapshots);
    }

    #[test]
    fn test_serialize_actions_omits_confidence() {
        let events = vec![ActionEvent {
            frame: FrameId::new("42"),
            action_id: 0,
            description: "install base".to_string(),
            confidence: Confidence::Observed,
        }];
        assert_eq!(serialize_actions(&events), "42,0,install base\n");
    }

    #[test]
    fn test_parse_rejects_frames_that_do_not_increase() {
        let repeated = "000000.jpg,0,0\n000000.jpg,1,0\n";
        match parse_snapshots(repeated, None).unwrap_err() {
            LabelError::MalformedSnapshot { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("does not come after 000000.jpg"));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let backwards = "000000.jpg,0,0\n000010.jpg,1,1\n\n000005.jpg,0,1\n";
        assert!(matches!(
            parse_snapshots(backwards, None),
            Err(LabelError::MalformedSnapshot { line: 4, .. })
        ));
    }
}
