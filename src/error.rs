use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BazelCheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No Bazel workspace found for {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("No Bazel target owns {}", path.display())]
    NoOwningTarget { path: PathBuf },

    #[error("Failed to run `{program}`")]
    ToolInvocation {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse build diagnostics: {0}")]
    DiagnosticParse(String),

    #[error("Failed to access file: {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl BazelCheckError {
    /// Short category label used as the heading of CLI error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::TomlParse(_) => "Config",
            Self::RootNotFound { .. } => "Workspace",
            Self::NoOwningTarget { .. } => "Targets",
            Self::ToolInvocation { .. } => "Tool",
            Self::DiagnosticParse(_) => "Diagnostics",
            Self::FileAccess { .. } => "FileAccess",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "JSON",
        }
    }

    /// Main message without the underlying cause.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Underlying cause, when there is one worth showing on its own line.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::ToolInvocation { source, .. } | Self::FileAccess { source, .. } => {
                Some(source.to_string())
            }
            _ => None,
        }
    }

    /// Actionable hint for the user, if any.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::RootNotFound { .. } => {
                Some("create a WORKSPACE or WORKSPACE.bazel file at the top of the project")
            }
            Self::ToolInvocation { .. } => {
                Some("set `bazel.executable` in the config or pass --bazel <PATH>")
            }
            Self::TomlParse(_) => Some("run `bazel-check config validate` for details"),
            _ => None,
        }
    }

    #[must_use]
    pub fn tool_invocation(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::ToolInvocation {
            program: program.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BazelCheckError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
