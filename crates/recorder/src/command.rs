//! Operator commands understood by a labeling session.

/// A single requested component change, as typed by the operator.
///
/// Values are kept raw so that out-of-range input can be reported back
/// verbatim instead of being rejected at the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRequest {
    pub component: usize,
    pub value: i64,
}

impl EditRequest {
    pub fn new(component: usize, value: i64) -> Self {
        Self { component, value }
    }
}

/// Everything a labeling session can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Playback: move to the next frame. Past the last frame the
    /// recording is finished.
    Tick,
    /// Advance by one step.
    Forward,
    /// Advance by one fast step.
    FastForward,
    /// Retreat by one step.
    Back,
    /// Retreat by one fast step.
    FastBack,
    /// Apply edits in order, then record a snapshot at the current frame if
    /// the state vector changed.
    Edit(Vec<EditRequest>),
    /// Show the snapshots recorded so far.
    PrintLabels,
    /// Remove the latest snapshot.
    DeleteLast,
    /// Show the recording name.
    ShowName,
    /// Start over from the first frame and the initial snapshot.
    Restart { confirmed: bool },
    /// Hard quit: discard this recording without writing output.
    Abort,
}

/// Command keys of the line-oriented front end, before any prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tick,
    Forward,
    FastForward,
    Back,
    FastBack,
    Edit,
    PrintLabels,
    DeleteLast,
    ShowName,
    Restart,
    Abort,
}

impl Key {
    /// Map one line of operator input to a key. An empty line plays the
    /// next frame.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() {
            // A lone space is the edit key; anything else blank is playback.
            return Some(if trimmed == " " { Self::Edit } else { Self::Tick });
        }
        match trimmed.trim() {
            "e" => Some(Self::Edit),
            "d" => Some(Self::Forward),
            "f" => Some(Self::FastForward),
            "a" => Some(Self::Back),
            "z" => Some(Self::FastBack),
            "w" => Some(Self::PrintLabels),
            "x" => Some(Self::DeleteLast),
            "s" => Some(Self::ShowName),
            "r" => Some(Self::Restart),
            "q" | "esc" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Hotkey reference shown to the operator.
pub const HELP: &[(&str, &str)] = &[
    ("<enter>", "next frame"),
    ("e / <space>", "enter change of state"),
    ("d / f", "forward / faster forward"),
    ("a / z", "backward / faster backward"),
    ("w", "print labels"),
    ("x", "delete last PSR entry"),
    ("s", "recording name"),
    ("r", "restart labeling"),
    ("q / esc", "hard quit (nothing is saved)"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::parse(""), Some(Key::Tick));
        assert_eq!(Key::parse("\n"), Some(Key::Tick));
        assert_eq!(Key::parse(" "), Some(Key::Edit));
        assert_eq!(Key::parse("e\n"), Some(Key::Edit));
        assert_eq!(Key::parse("f"), Some(Key::FastForward));
        assert_eq!(Key::parse("z"), Some(Key::FastBack));
        assert_eq!(Key::parse("esc"), Some(Key::Abort));
        assert_eq!(Key::parse("k"), None);
    }
}
