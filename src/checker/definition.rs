use std::path::PathBuf;
use std::sync::Arc;

use crate::command::CheckCommandBuilder;
use crate::config::Config;
use crate::diagnostics::{self, Diagnostic, DiagnosticFormat};
use crate::error::{BazelCheckError, Result};
use crate::filesystem::{FileSystem, RealFileSystem};
use crate::process::{CommandRunner, Invocation, SystemCommandRunner};
use crate::targets::{TargetId, TargetResolver, TargetSet};
use crate::verify::{TargetLookup, VerificationReport, VerificationReporter};
use crate::workspace::{Workspace, WorkspaceLocator};

use super::request::CheckRequest;
use super::state::{CheckEvent, StateTracker};

/// Workspace and owning targets resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub workspace: Workspace,
    /// Workspace-relative path handed to the query.
    pub relative_path: String,
    pub targets: Vec<TargetId>,
}

/// Everything a finished build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub workspace: Workspace,
    pub targets: TargetSet,
    pub invocation: Invocation,
    pub exit_code: Option<i32>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// The build failed but nothing could be parsed from its output, which
    /// usually means a broken BUILD file or a misconfigured toolchain.
    #[must_use]
    pub fn failed_without_diagnostics(&self) -> bool {
        self.exit_code != Some(0) && self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No enclosing workspace; the checker does not apply to this file.
    Disabled,
    /// Inside a workspace but owned by no target; nothing was built.
    Skipped { workspace: Workspace },
    Completed(CheckReport),
}

/// An immutable, fully assembled checker.
///
/// Bundles the command template, the enablement predicate, the working
/// directory rule and the diagnostic format. Hand it to
/// [`super::CheckerRegistry::register`] once at startup.
#[derive(Debug)]
pub struct CheckerDefinition<R: CommandRunner = SystemCommandRunner, F: FileSystem = RealFileSystem> {
    name: String,
    executable: String,
    locator: WorkspaceLocator<F>,
    builder: CheckCommandBuilder,
    runner: R,
    format: Arc<dyn DiagnosticFormat>,
}

impl CheckerDefinition {
    /// Checker running real processes against the real filesystem.
    ///
    /// # Errors
    /// Returns an error if the configured diagnostic format is unknown.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_parts(config, SystemCommandRunner, RealFileSystem)
    }
}

impl<R: CommandRunner, F: FileSystem> CheckerDefinition<R, F> {
    /// Assemble a checker from explicit collaborators.
    ///
    /// # Errors
    /// Returns an error if the configured diagnostic format is unknown.
    pub fn with_parts(config: &Config, runner: R, fs: F) -> Result<Self> {
        let format = diagnostics::format_by_name(&config.diagnostics.format).ok_or_else(|| {
            BazelCheckError::Config(format!(
                "unknown diagnostic format '{}'",
                config.diagnostics.format
            ))
        })?;
        let builder = CheckCommandBuilder::new(config.bazel.executable.as_str(), format.format_flag())
            .with_extra_flags(config.bazel.build_flags.iter().cloned());

        Ok(Self {
            name: format!("bazel-{}", format.name()),
            executable: config.bazel.executable.clone(),
            locator: WorkspaceLocator::with_fs(fs, config.workspace.markers.clone()),
            builder,
            runner,
            format,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn format(&self) -> &dyn DiagnosticFormat {
        self.format.as_ref()
    }

    /// Enablement predicate: the file has an enclosing workspace.
    #[must_use]
    pub fn is_enabled(&self, request: &CheckRequest) -> bool {
        self.locator.locate(request.file_path()).is_some()
    }

    /// The build runs from the workspace root.
    #[must_use]
    pub fn working_directory(&self, request: &CheckRequest) -> Option<PathBuf> {
        self.locator
            .locate(request.file_path())
            .map(|workspace| workspace.root().to_path_buf())
    }

    /// Find the workspace and query the owning targets, fresh every time.
    ///
    /// # Errors
    /// [`BazelCheckError::RootNotFound`] without a workspace;
    /// [`BazelCheckError::ToolInvocation`] if the query cannot be started.
    pub fn resolve(&self, request: &CheckRequest) -> Result<Resolution> {
        let not_found = || BazelCheckError::RootNotFound {
            path: request.file_path().to_path_buf(),
        };
        let absolute = self
            .locator
            .absolute_path(request.file_path())
            .ok_or_else(not_found)?;
        let workspace = self.locator.locate(&absolute).ok_or_else(not_found)?;

        let Some(relative_path) = workspace.relative_path(&absolute) else {
            // The request names the workspace root itself; no file, no owner.
            return Ok(Resolution {
                workspace,
                relative_path: String::new(),
                targets: Vec::new(),
            });
        };

        let targets = TargetResolver::new(&self.runner, self.executable.as_str())
            .resolve(&workspace, &relative_path)?;
        Ok(Resolution {
            workspace,
            relative_path,
            targets,
        })
    }

    /// The build command that a check would run, or `None` when no target
    /// owns the file.
    ///
    /// # Errors
    /// Same as [`Self::resolve`].
    pub fn command(&self, request: &CheckRequest) -> Result<Option<Invocation>> {
        let resolution = self.resolve(request)?;
        Ok(TargetSet::new(resolution.targets)
            .map(|targets| self.builder.build(&resolution.workspace, &targets)))
    }

    /// Run a full check: locate, resolve, build, then collect diagnostics.
    ///
    /// # Errors
    /// [`BazelCheckError::ToolInvocation`] when the query or the build cannot
    /// be started; parse failures from the diagnostic format pass through.
    pub fn run(&self, request: &CheckRequest) -> Result<CheckOutcome> {
        let mut tracker = StateTracker::default();

        let resolution = match self.resolve(request) {
            Ok(resolution) => resolution,
            Err(BazelCheckError::RootNotFound { .. }) => return Ok(CheckOutcome::Disabled),
            Err(e) => return Err(e),
        };
        tracker.apply(CheckEvent::WorkspaceFound);
        tracker.apply(CheckEvent::Triggered {
            has_targets: !resolution.targets.is_empty(),
        });

        let Some(targets) = TargetSet::new(resolution.targets) else {
            tracing::info!(
                file = %request.file_path().display(),
                "no target owns this file, skipping build"
            );
            return Ok(CheckOutcome::Skipped {
                workspace: resolution.workspace,
            });
        };

        let invocation = self.builder.build(&resolution.workspace, &targets);
        tracing::debug!(command = %invocation.display_command(), "running build");
        let output = self
            .runner
            .run(&invocation)
            .map_err(|source| BazelCheckError::tool_invocation(self.executable.as_str(), source))?;
        tracker.apply(CheckEvent::ProcessFinished);

        let raw = if output.stderr.is_empty() {
            output.stdout
        } else {
            format!("{}\n{}", output.stdout, output.stderr)
        };
        let diagnostics = diagnostics::collect(self.format.as_ref(), &raw, &resolution.workspace)?;
        tracing::info!(
            count = diagnostics.len(),
            exit_code = ?output.exit_code,
            "build finished"
        );
        tracker.apply(CheckEvent::ResultsDelivered);

        Ok(CheckOutcome::Completed(CheckReport {
            workspace: resolution.workspace,
            targets,
            invocation,
            exit_code: output.exit_code,
            diagnostics,
        }))
    }

    /// Re-run both lookups and report their status.
    #[must_use]
    pub fn verify(&self, request: &CheckRequest) -> VerificationReport {
        let workspace = self.locator.locate(request.file_path());
        let lookup = match &workspace {
            None => TargetLookup::Skipped,
            Some(_) => match self.resolve(request) {
                Ok(resolution) => {
                    TargetSet::new(resolution.targets).map_or(TargetLookup::NotFound, TargetLookup::Found)
                }
                Err(e) => TargetLookup::Failed(e),
            },
        };
        VerificationReporter::report(workspace.as_ref(), &lookup)
    }

    /// Long-form explanation from the diagnostic format.
    #[must_use]
    pub fn explain(&self, diagnostic: &Diagnostic) -> Option<String> {
        self.format.explain(diagnostic)
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
