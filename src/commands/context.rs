use std::io::Write;
use std::path::Path;

use crate::checker::{CheckRequest, CheckerDefinition, CheckerRegistry};
use crate::cli::Cli;
use crate::config::{Config, ConfigLoader, FileConfigLoader, LoadResult, validate_config_semantics};
use crate::filesystem::FileSystem;
use crate::output::ColorMode;
use crate::process::CommandRunner;
use crate::{BazelCheckError, Result};

/// Load configuration following the search order, or defaults with `--no-config`.
///
/// # Errors
/// Returns an error if the selected file cannot be read or parsed.
pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<LoadResult> {
    if no_config {
        return Ok(LoadResult::defaults());
    }
    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Apply `--bazel` and `--build-flag` on top of the loaded configuration.
pub(crate) fn apply_cli_overrides(config: &mut Config, bazel: Option<&str>, build_flags: &[String]) {
    if let Some(executable) = bazel {
        config.bazel.executable = executable.to_string();
    }
    config.bazel.build_flags.extend(build_flags.iter().cloned());
}

/// Everything a file command needs, assembled once at startup.
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub registry: CheckerRegistry,
    pub color: ColorMode,
    pub quiet: bool,
}

impl CommandContext {
    /// Load, override and validate the configuration, then register the checker.
    ///
    /// # Errors
    /// Returns an error if loading or validation fails.
    pub fn from_cli(cli: &Cli, build_flags: &[String]) -> Result<Self> {
        let loaded = load_config(cli.config.as_deref(), cli.no_config)?;
        if let Some(source) = &loaded.source {
            tracing::info!(path = %source.display(), "using config file");
        }
        let mut config = loaded.config;
        apply_cli_overrides(&mut config, cli.bazel.as_deref(), build_flags);
        validate_config_semantics(&config)?;

        let mut registry = CheckerRegistry::new();
        registry.register(CheckerDefinition::from_config(&config)?)?;

        Ok(Self {
            config,
            registry,
            color: cli.color.into(),
            quiet: cli.quiet,
        })
    }
}

/// The checker that applies to `request`, or [`BazelCheckError::RootNotFound`].
///
/// # Errors
/// Returns an error if no registered checker is enabled for the file.
pub(crate) fn enabled_checker<'a, R: CommandRunner, F: FileSystem>(
    registry: &'a CheckerRegistry<R, F>,
    request: &CheckRequest,
) -> Result<&'a CheckerDefinition<R, F>> {
    registry
        .checker_for(request)
        .ok_or_else(|| BazelCheckError::RootNotFound {
            path: request.file_path().to_path_buf(),
        })
}

/// Any registered checker, for reports that must work without a workspace.
///
/// # Errors
/// Returns an error if nothing is registered.
pub(crate) fn first_checker<R: CommandRunner, F: FileSystem>(
    registry: &CheckerRegistry<R, F>,
) -> Result<&CheckerDefinition<R, F>> {
    registry
        .iter()
        .next()
        .ok_or_else(|| BazelCheckError::Config("no checker is registered".to_string()))
}

/// Write command output unless `--quiet` is set.
///
/// # Errors
/// Returns an error if writing fails.
pub(crate) fn write_output<W: Write>(w: &mut W, content: &str, quiet: bool) -> Result<()> {
    if !quiet {
        w.write_all(content.as_bytes())?;
        w.flush()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
