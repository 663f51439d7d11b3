mod error_output;
mod json;
mod text;

pub use error_output::{ErrorOutput, print_bazel_error, print_error_full, print_note, print_warning};
pub use json::JsonFormatter;
pub use text::TextFormatter;

use std::path::Path;

use crate::checker::CheckReport;
use crate::error::Result;
use crate::verify::VerificationReport;
use crate::workspace::Workspace;

/// Renders check and verification results for the terminal or for tools.
pub trait OutputFormatter {
    /// Format the diagnostics of a finished check.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_check(&self, report: &CheckReport) -> Result<String>;

    /// Format a verification report.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_verification(&self, report: &VerificationReport) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if the stream is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against a concrete stream.
    #[must_use]
    pub fn use_colors(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            // Presence of NO_COLOR (any value) disables color, see https://no-color.org
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && is_terminal,
        }
    }
}

/// ANSI color codes
pub(crate) mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

/// `file` relative to the workspace root when it lies inside, else as given.
#[must_use]
pub fn display_path(workspace: &Workspace, file: &Path) -> String {
    workspace
        .relative_path(file)
        .unwrap_or_else(|| file.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn explicit_color_modes_ignore_the_terminal() {
        assert!(ColorMode::Always.use_colors(false));
        assert!(!ColorMode::Never.use_colors(true));
        assert!(!ColorMode::Auto.use_colors(false));
    }

    #[test]
    fn display_path_is_workspace_relative() {
        let ws = Workspace::new(PathBuf::from("/ws"));
        assert_eq!(display_path(&ws, Path::new("/ws/src/lib.rs")), "src/lib.rs");
        assert_eq!(
            display_path(&ws, Path::new("/rustc/library/core/src/fmt.rs")),
            "/rustc/library/core/src/fmt.rs"
        );
    }
}
