use std::io::Write;

use crate::checker::{CheckOutcome, CheckRequest, CheckerRegistry};
use crate::cli::{CheckArgs, Cli};
use crate::diagnostics::Severity;
use crate::filesystem::FileSystem;
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter, print_bazel_error,
    print_note, print_warning,
};
use crate::process::CommandRunner;
use crate::{BazelCheckError, EXIT_CHECK_FAILED, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::context::{CommandContext, write_output};

/// Rendering options for `check`.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    pub format: OutputFormat,
    pub explain: bool,
    pub color: ColorMode,
    pub quiet: bool,
}

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    let result = CommandContext::from_cli(cli, &args.build_flags).and_then(|ctx| {
        let options = CheckOptions {
            format: args.format,
            explain: args.explain,
            color: ctx.color,
            quiet: ctx.quiet,
        };
        let request = CheckRequest::new(&args.file);
        run_check_impl(&ctx.registry, &request, options, &mut std::io::stdout().lock())
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            print_bazel_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Run a check for `request` and write the rendered diagnostics to `w`.
///
/// Returns [`EXIT_CHECK_FAILED`] when the build reported an error-level
/// diagnostic or failed without reporting any. A file outside any workspace
/// or without an owning target is not a failure.
///
/// # Errors
/// Returns an error if a tool cannot be started or the output cannot be
/// parsed or written.
pub fn run_check_impl<R: CommandRunner, F: FileSystem, W: Write>(
    registry: &CheckerRegistry<R, F>,
    request: &CheckRequest,
    options: CheckOptions,
    w: &mut W,
) -> Result<i32> {
    let outcome = match registry.checker_for(request) {
        Some(checker) => checker.run(request)?,
        None => CheckOutcome::Disabled,
    };

    let report = match outcome {
        CheckOutcome::Completed(report) => report,
        CheckOutcome::Skipped { workspace } => {
            if !options.quiet {
                let reason = BazelCheckError::NoOwningTarget {
                    path: request.file_path().to_path_buf(),
                };
                print_note(&format!("{reason} in {workspace}, nothing to build"));
            }
            return Ok(EXIT_SUCCESS);
        }
        CheckOutcome::Disabled => {
            if !options.quiet {
                let reason = BazelCheckError::RootNotFound {
                    path: request.file_path().to_path_buf(),
                };
                print_note(&format!("{reason}, checker disabled"));
            }
            return Ok(EXIT_SUCCESS);
        }
    };

    let output = match options.format {
        OutputFormat::Text => TextFormatter::new(options.color)
            .with_explanations(options.explain)
            .format_check(&report)?,
        OutputFormat::Json => {
            let mut json = JsonFormatter.format_check(&report)?;
            json.push('\n');
            json
        }
    };
    write_output(w, &output, options.quiet)?;

    if report.failed_without_diagnostics() {
        let detail = report.exit_code.map_or_else(
            || "terminated by a signal".to_string(),
            |code| format!("exit code {code}"),
        );
        print_warning(
            "the build failed without reporting any diagnostics",
            Some(&format!("{detail}; run `{}`", report.invocation.display_command())),
        );
        return Ok(EXIT_CHECK_FAILED);
    }

    let has_errors = report
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Error);
    Ok(if has_errors {
        EXIT_CHECK_FAILED
    } else {
        EXIT_SUCCESS
    })
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
