//! Procedure description tables.
//!
//! A procedure table lists one entry per action identifier
//! (`0..3 * component_count`). It is supplied externally as a JSON array
//! of objects and consumed read-only.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::ACTIONS_PER_COMPONENT;
use crate::error::{LabelError, LabelResult};

/// One entry of the procedure table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureStep {
    pub description: String,
}

/// Ordered action description table, indexed by action identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcedureInfo {
    steps: Vec<ProcedureStep>,
}

impl ProcedureInfo {
    pub fn new(steps: Vec<ProcedureStep>) -> Self {
        Self { steps }
    }

    /// Build a table from bare descriptions, in action-id order.
    pub fn from_descriptions<I, S>(descriptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            descriptions
                .into_iter()
                .map(|d| ProcedureStep {
                    description: d.into(),
                })
                .collect(),
        )
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> LabelResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LabelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| LabelError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Description for `action_id`.
    pub fn description(&self, action_id: usize) -> LabelResult<&str> {
        self.steps
            .get(action_id)
            .map(|step| step.description.as_str())
            .ok_or(LabelError::UnknownAction { action_id })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of components fully covered by this table.
    pub fn component_capacity(&self) -> usize {
        self.steps.len() / ACTIONS_PER_COMPONENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let raw = r#"[
            {"id": 0, "description": "install base", "type": "install"},
            {"id": 1, "description": "wrongly install base"},
            {"id": 2, "description": "remove base"}
        ]"#;
        let info: ProcedureInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.len(), 3);
        assert_eq!(info.component_capacity(), 1);
        assert_eq!(info.description(2).unwrap(), "remove base");
    }

    #[test]
    fn test_missing_entry_is_unknown_action() {
        let info = ProcedureInfo::from_descriptions(["a", "b", "c"]);
        let err = info.description(3).unwrap_err();
        assert!(matches!(err, LabelError::UnknownAction { action_id: 3 }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("procedure_info.json");
        std::fs::write(&path, r#"[{"description":"install base"}]"#).unwrap();

        let info = ProcedureInfo::load(&path).unwrap();
        assert_eq!(info.description(0).unwrap(), "install base");

        let missing = ProcedureInfo::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, LabelError::Io { .. }));
    }
}
