use crate::process::Invocation;
use crate::targets::{TargetId, TargetSet};
use crate::workspace::Workspace;

/// Flags that hide Bazel's own chatter from the build output. Errors stay
/// visible so a broken BUILD file is still reported.
pub const BUILD_UI_FLAGS: [&str; 2] = [
    "--ui_event_filters=-info,-debug,-warning,-stderr",
    "--noshow_progress",
];

/// Assembles `bazel build` command lines.
///
/// Argument order: `build`, the UI flags, the diagnostic format flag, the
/// user's extra flags, then the targets.
#[derive(Debug, Clone)]
pub struct CheckCommandBuilder {
    executable: String,
    format_flag: String,
    extra_flags: Vec<String>,
}

impl CheckCommandBuilder {
    #[must_use]
    pub fn new(executable: impl Into<String>, format_flag: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            format_flag: format_flag.into(),
            extra_flags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_extra_flags(mut self, flags: impl IntoIterator<Item = String>) -> Self {
        self.extra_flags.extend(flags);
        self
    }

    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Build command for `targets`, run from the workspace root.
    #[must_use]
    pub fn build(&self, workspace: &Workspace, targets: &TargetSet) -> Invocation {
        Invocation::new(self.executable.as_str(), workspace.root())
            .arg("build")
            .args(BUILD_UI_FLAGS)
            .arg(self.format_flag.as_str())
            .args(self.extra_flags.iter().map(String::as_str))
            .args(targets.iter().map(TargetId::as_str))
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
