use serde::{Deserialize, Serialize};

/// Build-tool executable used when nothing else is configured.
pub const DEFAULT_EXECUTABLE: &str = "bazel";

/// Marker files that identify a workspace root, in probe order.
pub const DEFAULT_MARKERS: &[&str] = &["WORKSPACE", "WORKSPACE.bazel"];

/// Name of the diagnostic format used when nothing else is configured.
pub const DEFAULT_DIAGNOSTIC_FORMAT: &str = "rustc-json";

/// Process-wide settings. There is no per-file or per-workspace override.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bazel: BazelConfig,

    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// How the build tool is invoked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BazelConfig {
    /// Executable name or path, resolved through `PATH` when bare.
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Extra flags appended to every build invocation, before the targets.
    #[serde(default)]
    pub build_flags: Vec<String>,
}

impl Default for BazelConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            build_flags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// File names whose presence marks a workspace root.
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            markers: default_markers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Diagnostic format matched to the compiler behind the build.
    #[serde(default = "default_diagnostic_format")]
    pub format: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            format: default_diagnostic_format(),
        }
    }
}

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

fn default_markers() -> Vec<String> {
    DEFAULT_MARKERS.iter().map(|m| (*m).to_string()).collect()
}

fn default_diagnostic_format() -> String {
    DEFAULT_DIAGNOSTIC_FORMAT.to_string()
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
