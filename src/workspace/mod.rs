//! Workspace root discovery.
//!
//! A workspace is identified solely by its root directory: the nearest
//! ancestor of a file that contains one of the configured marker files.
//! Nothing is cached; every lookup probes the filesystem again.

mod locator;

pub use locator::WorkspaceLocator;

use std::path::{Component, Path, PathBuf};

/// Root directory of an enclosing Bazel workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Absolute path of the workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `file` relative to the root, with `/` separators as Bazel expects.
    ///
    /// Returns `None` when `file` is not inside the workspace.
    #[must_use]
    pub fn relative_path(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(parts.join("/"))
    }
}

impl std::fmt::Display for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root.display())
    }
}
