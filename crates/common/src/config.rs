//! Application configuration.
//!
//! A single [`AppConfig`] is passed explicitly into the recorder and the
//! translator. It is loaded from `$XDG_CONFIG_HOME/psr/config.json` (or a
//! path given on the command line), falling back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use psr_label_model::StateVector;

use crate::error::{PsrError, PsrResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset layout and file naming.
    pub dataset: DatasetConfig,

    /// Interactive labeling parameters.
    pub labeling: LabelingConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Where recordings live and how label files are named.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Root folder holding the `train`/`val`/`test` split folders.
    pub data_dir: PathBuf,

    /// Folder the recorder writes snapshot files into.
    pub save_dir: PathBuf,

    /// Extension of frame images inside a recording folder (without dot).
    pub frame_extension: String,

    /// Procedure description table used by the translator.
    pub procedure_info: PathBuf,

    /// Suffix appended to the recording name for recorder output.
    pub snapshot_suffix: String,

    /// Snapshot file read by the translator inside each recording folder.
    pub raw_labels_file: String,

    /// Action file written by the translator when errors are dropped.
    pub labels_file: String,

    /// Action file written by the translator when errors are kept.
    pub labels_with_errors_file: String,
}

/// Parameters of the interactive snapshot recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Number of tracked components (state vector length).
    pub component_count: usize,

    /// Display names per component. Empty means "use the index".
    pub component_names: Vec<String>,

    /// Frame rate of the extracted frames, used for status timestamps.
    pub fps: u32,

    /// Frames skipped by a single forward/back step.
    pub step: usize,

    /// Multiplier applied to `step` for fast forward/back.
    pub fast_multiplier: usize,

    /// Initial state rules, matched against the recording name in order.
    pub initial_states: Vec<InitialStateRule>,
}

/// Initial state vector for recordings whose name contains `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialStateRule {
    pub pattern: String,
    pub states: StateVector,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "psr_translator=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            save_dir: PathBuf::from("labels"),
            frame_extension: "jpg".to_string(),
            procedure_info: PathBuf::from("procedure_info.json"),
            snapshot_suffix: "_PSR_labels.csv".to_string(),
            raw_labels_file: "PSR_labels_raw.csv".to_string(),
            labels_file: "PSR_labels.csv".to_string(),
            labels_with_errors_file: "PSR_labels_with_errors.csv".to_string(),
        }
    }
}

impl Default for LabelingConfig {
    fn default() -> Self {
        let component_names = [
            "base",
            "front chassis",
            "front chassis pin",
            "rear chassis",
            "short rear chassis",
            "front rear chassis pin",
            "rear rear chassis pin",
            "front bracket",
            "front bracket screw",
            "front wheel assy",
            "rear wheel assy",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();

        Self {
            component_count: component_names.len(),
            component_names,
            fps: 10,
            step: 10,
            fast_multiplier: 10,
            initial_states: vec![],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> PsrResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PsrError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> PsrResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> PsrResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check internal consistency of the labeling parameters.
    pub fn validate(&self) -> PsrResult<()> {
        let labeling = &self.labeling;
        let n = labeling.component_count;
        if n == 0 {
            return Err(PsrError::config("component_count must be at least 1"));
        }
        if !labeling.component_names.is_empty() && labeling.component_names.len() != n {
            return Err(PsrError::config(format!(
                "{} component names given for {n} components",
                labeling.component_names.len()
            )));
        }
        if labeling.step == 0 || labeling.fast_multiplier == 0 || labeling.fps == 0 {
            return Err(PsrError::config(
                "step, fast_multiplier and fps must be positive",
            ));
        }
        for rule in &labeling.initial_states {
            if rule.states.len() != n {
                return Err(PsrError::config(format!(
                    "initial state rule '{}' has {} states, expected {n}",
                    rule.pattern,
                    rule.states.len()
                )));
            }
        }
        if self.dataset.frame_extension.is_empty() {
            return Err(PsrError::config("frame_extension must not be empty"));
        }
        Ok(())
    }
}

impl LabelingConfig {
    /// Frames moved by a fast forward/back.
    pub fn fast_step(&self) -> usize {
        self.step.saturating_mul(self.fast_multiplier)
    }

    /// First initial-state rule whose pattern occurs in `recording_name`.
    pub fn initial_rule_for(&self, recording_name: &str) -> Option<&InitialStateRule> {
        self.initial_states
            .iter()
            .find(|rule| recording_name.contains(&rule.pattern))
    }

    /// Display name for component `k`.
    pub fn component_name(&self, k: usize) -> String {
        match self.component_names.get(k) {
            Some(name) => format!("({k}) {name}"),
            None => format!("({k})"),
        }
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("psr").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.labeling.component_count, 11);
        assert_eq!(config.labeling.fast_step(), 100);
        assert_eq!(config.labeling.component_name(1), "(1) front chassis");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let raw = r#"{ "labeling": { "component_count": 17, "component_names": [] } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        config.validate().unwrap();
        assert_eq!(config.labeling.component_count, 17);
        assert_eq!(config.labeling.step, 10);
        assert_eq!(config.dataset.raw_labels_file, "PSR_labels_raw.csv");
        assert_eq!(config.labeling.component_name(16), "(16)");
    }

    #[test]
    fn test_validate_rejects_mismatched_initial_state() {
        let mut config = AppConfig::default();
        config.labeling.initial_states.push(InitialStateRule {
            pattern: "assy".to_string(),
            states: StateVector::absent(3),
        });
        assert!(matches!(config.validate(), Err(PsrError::Config { .. })));
    }

    #[test]
    fn test_initial_rule_matches_by_substring_in_order() {
        let raw = r#"{
            "labeling": {
                "initial_states": [
                    { "pattern": "assy", "states": [1,0,0,0,0,0,0,0,0,0,0] },
                    { "pattern": "main", "states": [1,1,1,1,0,1,1,1,1,1,1] }
                ]
            }
        }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        config.validate().unwrap();

        let rule = config.labeling.initial_rule_for("01_main_0_2").unwrap();
        assert_eq!(rule.pattern, "main");
        assert!(config.labeling.initial_rule_for("01_other").is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("psr").join("config.json");

        let mut config = AppConfig::default();
        config.labeling.step = 5;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.labeling.step, 5);
        assert!(matches!(
            AppConfig::load_from(dir.path().join("missing.json")),
            Err(PsrError::FileNotFound { .. })
        ));
    }
}
