use std::path::{Path, PathBuf};

/// The file a check was requested for.
///
/// Passed explicitly to every operation; nothing reads editor or process
/// state to find out which file is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    file_path: PathBuf,
}

impl CheckRequest {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
