//! Frame discovery inside a recording folder.

use std::path::{Path, PathBuf};

use psr_common::error::{PsrError, PsrResult};

/// Lexicographically sorted frame file names of one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameList {
    dir: PathBuf,
    names: Vec<String>,
}

impl FrameList {
    /// Collect files ending in `.{extension}` from `dir`.
    ///
    /// Anything else found in the folder is excluded with a warning.
    pub fn discover(dir: &Path, extension: &str) -> PsrResult<Self> {
        if !dir.is_dir() {
            return Err(PsrError::FileNotFound {
                path: dir.to_path_buf(),
            });
        }

        let suffix = format!(".{extension}");
        let mut names = vec![];
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_file() && name.ends_with(&suffix) {
                names.push(name);
            } else {
                tracing::warn!(file = %name, "Excluding non-frame entry from the frames");
            }
        }
        names.sort();

        Ok(Self {
            dir: dir.to_path_buf(),
            names,
        })
    }

    /// Build a list from known names (sorted on construction).
    pub fn from_names(dir: impl Into<PathBuf>, mut names: Vec<String>) -> Self {
        names.sort();
        Self {
            dir: dir.into(),
            names,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Full path of frame `index`, for an external viewer.
    pub fn path(&self, index: usize) -> Option<PathBuf> {
        self.name(index).map(|name| self.dir.join(name))
    }

    pub fn last_index(&self) -> usize {
        self.names.len().saturating_sub(1)
    }
}
