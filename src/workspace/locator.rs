use std::path::{Component, Path, PathBuf};

use crate::config::DEFAULT_MARKERS;
use crate::filesystem::{FileSystem, RealFileSystem};

use super::Workspace;

/// Finds the workspace root enclosing a file by walking up its ancestors.
#[derive(Debug, Clone)]
pub struct WorkspaceLocator<F: FileSystem = RealFileSystem> {
    fs: F,
    markers: Vec<String>,
}

impl Default for WorkspaceLocator<RealFileSystem> {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS.iter().map(|m| (*m).to_string()).collect())
    }
}

impl WorkspaceLocator<RealFileSystem> {
    #[must_use]
    pub const fn new(markers: Vec<String>) -> Self {
        Self {
            fs: RealFileSystem,
            markers,
        }
    }
}

impl<F: FileSystem> WorkspaceLocator<F> {
    #[must_use]
    pub const fn with_fs(fs: F, markers: Vec<String>) -> Self {
        Self { fs, markers }
    }

    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Locate the workspace enclosing `file_path`.
    ///
    /// The walk starts at the directory containing `file_path` (or at
    /// `file_path` itself when it is a directory) and stops at the first
    /// ancestor holding any marker file. Returns `None` when the filesystem
    /// root is reached without a match. Read-only.
    #[must_use]
    pub fn locate(&self, file_path: &Path) -> Option<Workspace> {
        let absolute = self.absolute_path(file_path)?;
        let start = if self.fs.exists(&absolute) && !self.fs.is_file(&absolute) {
            absolute.as_path()
        } else {
            absolute.parent()?
        };

        let found = start
            .ancestors()
            .find(|dir| self.has_marker(dir))
            .map(|dir| Workspace::new(dir.to_path_buf()));

        match &found {
            Some(workspace) => {
                tracing::debug!(file = %file_path.display(), root = %workspace, "workspace root found");
            }
            None => tracing::debug!(file = %file_path.display(), "no workspace root found"),
        }
        found
    }

    fn has_marker(&self, dir: &Path) -> bool {
        self.markers
            .iter()
            .any(|marker| self.fs.is_file(&dir.join(marker)))
    }

    /// `file_path` made absolute against the current directory, with `.` and
    /// `..` folded lexically. Symlinks are left alone so the result names the
    /// file being edited, not whatever it points at. Unsaved buffers need no
    /// file on disk.
    #[must_use]
    pub fn absolute_path(&self, file_path: &Path) -> Option<PathBuf> {
        let joined = if file_path.is_absolute() {
            file_path.to_path_buf()
        } else {
            self.fs.current_dir().ok()?.join(file_path)
        };
        Some(normalize_lexically(&joined))
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
