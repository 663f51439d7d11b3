use std::io::Write;

use crate::checker::{CheckRequest, CheckerRegistry};
use crate::cli::{Cli, VerifyArgs};
use crate::filesystem::FileSystem;
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter, print_bazel_error,
};
use crate::process::CommandRunner;
use crate::{EXIT_CHECK_FAILED, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::context::{CommandContext, first_checker, write_output};

#[must_use]
pub fn run_verify(args: &VerifyArgs, cli: &Cli) -> i32 {
    let result = CommandContext::from_cli(cli, &[]).and_then(|ctx| {
        run_verify_impl(
            &ctx.registry,
            &CheckRequest::new(&args.file),
            args.format,
            ctx.color,
            &mut std::io::stdout().lock(),
        )
    });
    match result {
        Ok(code) => code,
        Err(e) => {
            print_bazel_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Print the two-entry health report for `request`.
///
/// Returns [`EXIT_CHECK_FAILED`] when any entry is error-level.
///
/// # Errors
/// Returns an error if the report cannot be rendered or written.
pub fn run_verify_impl<R: CommandRunner, F: FileSystem, W: Write>(
    registry: &CheckerRegistry<R, F>,
    request: &CheckRequest,
    format: OutputFormat,
    color: ColorMode,
    w: &mut W,
) -> Result<i32> {
    let report = first_checker(registry)?.verify(request);

    let output = match format {
        OutputFormat::Text => TextFormatter::new(color).format_verification(&report)?,
        OutputFormat::Json => JsonFormatter.format_verification(&report)? + "\n",
    };
    write_output(w, &output, false)?;

    Ok(if report.has_errors() {
        EXIT_CHECK_FAILED
    } else {
        EXIT_SUCCESS
    })
}
