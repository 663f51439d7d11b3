use std::fs;

use crate::cli::InitArgs;
use crate::output::print_bazel_error;
use crate::{BazelCheckError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_bazel_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Write the configuration template.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(BazelCheckError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template()).map_err(|source| {
        BazelCheckError::FileAccess {
            path: output_path.clone(),
            source,
        }
    })?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# bazel-check configuration file
#
# Looked up in this order, first hit wins:
#   1. --config <PATH>
#   2. .bazel-check.toml in the current directory
#   3. config.toml in the user configuration directory

[bazel]
# Build tool executable, resolved through PATH when bare (default: "bazel")
executable = "bazel"

# Extra flags appended to every build, before the targets
# build_flags = ["--config=ci", "--keep_going"]
build_flags = []

[workspace]
# Files whose presence marks the workspace root, probed in order
markers = ["WORKSPACE", "WORKSPACE.bazel"]

[diagnostics]
# Compiler output format requested from the build (default: "rustc-json")
format = "rustc-json"
"#
    .to_string()
}
