//! `root`, `targets` and `command`: the individual pipeline stages on their own.

use std::io::Write;

use crate::checker::{CheckRequest, CheckerRegistry};
use crate::cli::{Cli, CommandArgs, FileArgs};
use crate::filesystem::FileSystem;
use crate::output::{print_bazel_error, print_note};
use crate::process::CommandRunner;
use crate::{BazelCheckError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::context::{CommandContext, enabled_checker};

fn run_with_context(
    cli: &Cli,
    build_flags: &[String],
    body: impl FnOnce(&CommandContext, &mut std::io::StdoutLock<'_>) -> Result<i32>,
) -> i32 {
    let result = CommandContext::from_cli(cli, build_flags)
        .and_then(|ctx| body(&ctx, &mut std::io::stdout().lock()));
    match result {
        Ok(code) => code,
        Err(e) => {
            print_bazel_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

fn no_owner(request: &CheckRequest) -> BazelCheckError {
    BazelCheckError::NoOwningTarget {
        path: request.file_path().to_path_buf(),
    }
}

#[must_use]
pub fn run_root(args: &FileArgs, cli: &Cli) -> i32 {
    run_with_context(cli, &[], |ctx, out| {
        run_root_impl(&ctx.registry, &CheckRequest::new(&args.file), out)
    })
}

#[must_use]
pub fn run_targets(args: &FileArgs, cli: &Cli) -> i32 {
    run_with_context(cli, &[], |ctx, out| {
        run_targets_impl(&ctx.registry, &CheckRequest::new(&args.file), ctx.quiet, out)
    })
}

#[must_use]
pub fn run_command(args: &CommandArgs, cli: &Cli) -> i32 {
    run_with_context(cli, &args.build_flags, |ctx, out| {
        run_command_impl(&ctx.registry, &CheckRequest::new(&args.file), ctx.quiet, out)
    })
}

/// Print the workspace root enclosing the file.
///
/// # Errors
/// Returns [`crate::BazelCheckError::RootNotFound`] outside any workspace.
pub fn run_root_impl<R: CommandRunner, F: FileSystem, W: Write>(
    registry: &CheckerRegistry<R, F>,
    request: &CheckRequest,
    w: &mut W,
) -> Result<i32> {
    let root = enabled_checker(registry, request)?
        .working_directory(request)
        .ok_or_else(|| BazelCheckError::RootNotFound {
            path: request.file_path().to_path_buf(),
        })?;
    writeln!(w, "{}", root.display())?;
    Ok(EXIT_SUCCESS)
}

/// Print one owning target per line; nothing when no target owns the file.
///
/// # Errors
/// Returns an error outside any workspace or when the query cannot be started.
pub fn run_targets_impl<R: CommandRunner, F: FileSystem, W: Write>(
    registry: &CheckerRegistry<R, F>,
    request: &CheckRequest,
    quiet: bool,
    w: &mut W,
) -> Result<i32> {
    let resolution = enabled_checker(registry, request)?.resolve(request)?;
    if resolution.targets.is_empty() && !quiet {
        print_note(&no_owner(request).message());
    }
    let output: String = resolution
        .targets
        .iter()
        .map(|target| format!("{target}\n"))
        .collect();
    w.write_all(output.as_bytes())?;
    Ok(EXIT_SUCCESS)
}

/// Print the working directory and the build command without running it.
///
/// # Errors
/// Returns an error outside any workspace or when the query cannot be started.
pub fn run_command_impl<R: CommandRunner, F: FileSystem, W: Write>(
    registry: &CheckerRegistry<R, F>,
    request: &CheckRequest,
    quiet: bool,
    w: &mut W,
) -> Result<i32> {
    let Some(invocation) = enabled_checker(registry, request)?.command(request)? else {
        if !quiet {
            print_note(&format!("{}, nothing would be built", no_owner(request)));
        }
        return Ok(EXIT_SUCCESS);
    };

    let output = format!(
        "Working directory: {}\nCommand: {}\n",
        invocation.current_dir().display(),
        invocation.display_command()
    );
    w.write_all(output.as_bytes())?;
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
