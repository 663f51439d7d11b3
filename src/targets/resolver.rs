use crate::error::{BazelCheckError, Result};
use crate::process::{CommandRunner, Invocation};
use crate::workspace::Workspace;

use super::TargetId;

/// Flags that silence Bazel's own UI so stdout carries only query results.
pub const QUERY_UI_FLAGS: [&str; 2] = [
    "--ui_event_filters=-info,-debug,-warning,-error,-stderr",
    "--noshow_progress",
];

/// Rule targets that depend on `relative_path` directly (distance 1),
/// searched across the whole workspace.
///
/// Bazel query words have no escapes, so the path is wrapped in whichever
/// quote it does not contain. Returns `None` when it holds both quotes or a
/// backslash, none of which can name a source file in a label.
#[must_use]
pub fn query_expression(relative_path: &str) -> Option<String> {
    if relative_path.contains('\\') {
        return None;
    }
    let quote = match (relative_path.contains('"'), relative_path.contains('\'')) {
        (false, _) => '"',
        (true, false) => '\'',
        (true, true) => return None,
    };
    Some(format!(
        "kind(\".* rule\", rdeps(//..., {quote}{relative_path}{quote}, 1))"
    ))
}

/// One label per non-empty line, in the order the tool printed them.
#[must_use]
pub fn parse_target_lines(stdout: &str) -> Vec<TargetId> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(TargetId::new)
        .collect()
}

/// Asks `bazel query` which targets would rebuild a file.
///
/// Every call runs a fresh query so the answer always reflects the BUILD
/// files currently on disk.
#[derive(Debug, Clone)]
pub struct TargetResolver<R: CommandRunner> {
    runner: R,
    executable: String,
}

impl<R: CommandRunner> TargetResolver<R> {
    #[must_use]
    pub fn new(runner: R, executable: impl Into<String>) -> Self {
        Self {
            runner,
            executable: executable.into(),
        }
    }

    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Invocation used to resolve `relative_path` inside `workspace`, or
    /// `None` when the path cannot be written as a query word.
    #[must_use]
    pub fn query_invocation(&self, workspace: &Workspace, relative_path: &str) -> Option<Invocation> {
        let expression = query_expression(relative_path)?;
        Some(
            Invocation::new(self.executable.as_str(), workspace.root())
                .arg("query")
                .args(QUERY_UI_FLAGS)
                .arg(expression),
        )
    }

    /// Resolve the targets owning `relative_path`, possibly none.
    ///
    /// The query's exit status is ignored: a failing query with partial or
    /// empty output yields whatever lines it printed. A path that cannot be
    /// quoted for the query is reported with a warning and owns nothing.
    ///
    /// # Errors
    /// Returns [`BazelCheckError::ToolInvocation`] when the executable cannot
    /// be started at all.
    pub fn resolve(&self, workspace: &Workspace, relative_path: &str) -> Result<Vec<TargetId>> {
        let Some(invocation) = self.query_invocation(workspace, relative_path) else {
            tracing::warn!(file = relative_path, "path cannot be quoted in a bazel query");
            return Ok(Vec::new());
        };
        let output = self
            .runner
            .run(&invocation)
            .map_err(|source| BazelCheckError::tool_invocation(self.executable.as_str(), source))?;

        if !output.success() {
            tracing::debug!(
                exit_code = ?output.exit_code,
                stderr = %output.stderr.trim(),
                "ignoring nonzero query exit status"
            );
        }

        let targets = parse_target_lines(&output.stdout);
        tracing::debug!(file = relative_path, count = targets.len(), "resolved owning targets");
        Ok(targets)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
