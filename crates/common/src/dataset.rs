//! Dataset layout: split folders and recording discovery.
//!
//! ```text
//! <data_dir>/
//!   train/<recording>/...
//!   val/<recording>/...
//!   test/<recording>/...
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PsrError, PsrResult};

/// A named dataset split folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Val,
    Test,
}

impl DatasetSplit {
    pub const ALL: [DatasetSplit; 3] = [Self::Train, Self::Val, Self::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Val => "val",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for DatasetSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetSplit {
    type Err = PsrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Self::Train),
            "val" => Ok(Self::Val),
            "test" => Ok(Self::Test),
            other => Err(PsrError::dataset(format!(
                "unknown split '{other}' (expected train, val or test)"
            ))),
        }
    }
}

/// A recording folder inside a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    pub split: DatasetSplit,
    pub name: String,
    pub path: PathBuf,
}

impl Recording {
    /// Path of a file inside the recording folder.
    pub fn file(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }
}

/// List recordings under the given splits, sorted by name within each split.
///
/// Missing split folders are skipped with a warning; a missing data root is
/// an error.
pub fn list_recordings(data_dir: &Path, splits: &[DatasetSplit]) -> PsrResult<Vec<Recording>> {
    if !data_dir.is_dir() {
        return Err(PsrError::FileNotFound {
            path: data_dir.to_path_buf(),
        });
    }

    let mut recordings = vec![];
    for &split in splits {
        let split_dir = data_dir.join(split.as_str());
        if !split_dir.is_dir() {
            tracing::warn!(split = %split, path = %split_dir.display(), "Split folder missing, skipping");
            continue;
        }

        let mut found = vec![];
        for entry in std::fs::read_dir(&split_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            found.push(Recording {
                split,
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
            });
        }
        found.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(split = %split, count = found.len(), "Discovered recordings");
        recordings.extend(found);
    }

    Ok(recordings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_parsing() {
        assert_eq!("val".parse::<DatasetSplit>().unwrap(), DatasetSplit::Val);
        assert!("dev".parse::<DatasetSplit>().is_err());
    }

    #[test]
    fn test_list_recordings_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("train");
        std::fs::create_dir_all(train.join("rec_b")).unwrap();
        std::fs::create_dir_all(train.join("rec_a")).unwrap();
        std::fs::write(train.join("notes.txt"), "x").unwrap();
        std::fs::create_dir_all(dir.path().join("test").join("rec_c")).unwrap();

        let recordings = list_recordings(dir.path(), &DatasetSplit::ALL).unwrap();
        let names: Vec<_> = recordings.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["rec_a", "rec_b", "rec_c"]);
        assert_eq!(recordings[2].split, DatasetSplit::Test);
        assert_eq!(
            recordings[0].file("PSR_labels_raw.csv"),
            train.join("rec_a").join("PSR_labels_raw.csv")
        );
    }

    #[test]
    fn test_missing_data_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_recordings(&dir.path().join("nope"), &[DatasetSplit::Train]).unwrap_err();
        assert!(matches!(err, PsrError::FileNotFound { .. }));
    }
}
