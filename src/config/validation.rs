//! Configuration semantic validation.
//!
//! Runs after parsing; TOML syntax and unknown keys are already rejected by serde.

use crate::config::Config;
use crate::diagnostics;
use crate::{BazelCheckError, Result};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if the executable is blank, no marker is configured, a
/// marker is not a plain file name, or the diagnostic format is unknown.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    validate_bazel_section(config)?;
    validate_workspace_section(config)?;
    validate_diagnostics_section(config)?;
    Ok(())
}

fn validate_bazel_section(config: &Config) -> Result<()> {
    if config.bazel.executable.trim().is_empty() {
        return Err(BazelCheckError::Config(
            "bazel.executable must not be empty".to_string(),
        ));
    }

    for (i, flag) in config.bazel.build_flags.iter().enumerate() {
        if flag.trim().is_empty() {
            return Err(BazelCheckError::Config(format!(
                "bazel.build_flags[{i}] must not be empty"
            )));
        }
    }
    Ok(())
}

fn validate_workspace_section(config: &Config) -> Result<()> {
    if config.workspace.markers.is_empty() {
        return Err(BazelCheckError::Config(
            "workspace.markers must list at least one file name".to_string(),
        ));
    }

    for (i, marker) in config.workspace.markers.iter().enumerate() {
        if marker.is_empty() || marker.contains(['/', '\\']) || marker == "." || marker == ".." {
            return Err(BazelCheckError::Config(format!(
                "workspace.markers[{i}] must be a plain file name, got '{marker}'"
            )));
        }
    }
    Ok(())
}

fn validate_diagnostics_section(config: &Config) -> Result<()> {
    if diagnostics::format_by_name(&config.diagnostics.format).is_none() {
        return Err(BazelCheckError::Config(format!(
            "diagnostics.format has unknown value '{}'. Valid values: {}",
            config.diagnostics.format,
            diagnostics::KNOWN_FORMATS.join(", ")
        )));
    }
    Ok(())
}
