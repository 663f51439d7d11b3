use std::path::{Path, PathBuf};

use crate::error::{BazelCheckError, Result};
use crate::filesystem::{FileSystem, RealFileSystem};

use super::Config;

/// Result of loading a configuration, containing both the config and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// The file the configuration came from, `None` for built-in defaults.
    pub source: Option<PathBuf>,
}

impl LoadResult {
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            config: Config::default(),
            source: None,
        }
    }
}

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    fn load(&self) -> Result<LoadResult>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<LoadResult>;
}

pub const LOCAL_CONFIG_NAME: &str = ".bazel-check.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.bazel-check.toml` in current directory
/// 2. Platform-specific user config directory:
///    - Windows: `%APPDATA%\bazel-check\config.toml`
///    - macOS: `~/Library/Application Support/bazel-check/config.toml`
///    - Linux: `~/.config/bazel-check/config.toml` (XDG)
/// 3. Returns `Config::default()` if no config found
///
/// The first file found wins; files are never merged.
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    /// Parse TOML text into a [`Config`].
    ///
    /// # Errors
    /// Returns an error on TOML syntax errors or unknown keys.
    pub fn parse_config(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(BazelCheckError::from)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<LoadResult> {
        if let Some(local_path) = self.local_config_path()
            && self.fs.exists(&local_path)
        {
            return self.load_from_path(&local_path);
        }

        if let Some(user_path) = self.user_config_path()
            && self.fs.exists(&user_path)
        {
            return self.load_from_path(&user_path);
        }

        tracing::debug!("no config file found, using defaults");
        Ok(LoadResult::defaults())
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadResult> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| BazelCheckError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::parse_config(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(LoadResult {
            config,
            source: Some(path.to_path_buf()),
        })
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
