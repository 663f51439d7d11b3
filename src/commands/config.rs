use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, ConfigAction, ConfigArgs};
use crate::config::{Config, LOCAL_CONFIG_NAME, LoadResult, validate_config_semantics};
use crate::output::{OutputFormat, print_bazel_error, print_error_full};
use crate::{BazelCheckError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::context::{apply_cli_overrides, load_config};

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    match &args.action {
        ConfigAction::Validate => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_NAME));
            run_config_validate(&path)
        }
        ConfigAction::Show { format } => run_config_show(*format, cli),
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error_full(e.error_type(), &e.message(), e.detail().as_deref(), None);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Validates a configuration file.
///
/// # Errors
/// Returns an error if the file doesn't exist, contains invalid TOML, or has semantic errors.
pub fn run_config_validate_impl(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        return Err(BazelCheckError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let content = std::fs::read_to_string(config_path).map_err(|source| {
        BazelCheckError::FileAccess {
            path: config_path.to_path_buf(),
            source,
        }
    })?;
    let config: Config = toml::from_str(&content)?;
    validate_config_semantics(&config)?;
    Ok(())
}

fn run_config_show(format: OutputFormat, cli: &Cli) -> i32 {
    let result = load_config(cli.config.as_deref(), cli.no_config).and_then(|mut loaded| {
        apply_cli_overrides(&mut loaded.config, cli.bazel.as_deref(), &[]);
        format_config(&loaded, format)
    });
    match result {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            print_bazel_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Render the effective configuration.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn format_config(loaded: &LoadResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_config_text(loaded)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&loaded.config)? + "\n"),
    }
}

pub(crate) fn format_config_text(loaded: &LoadResult) -> String {
    let config = &loaded.config;
    let mut output = String::new();

    output.push_str("=== Effective Configuration ===\n");
    let _ = writeln!(
        output,
        "source: {}\n",
        loaded
            .source
            .as_ref()
            .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string())
    );

    output.push_str("[bazel]\n");
    let _ = writeln!(output, "  executable = {:?}", config.bazel.executable);
    let _ = writeln!(output, "  build_flags = {:?}", config.bazel.build_flags);

    output.push_str("\n[workspace]\n");
    let _ = writeln!(output, "  markers = {:?}", config.workspace.markers);

    output.push_str("\n[diagnostics]\n");
    let _ = writeln!(output, "  format = {:?}", config.diagnostics.format);

    output
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
