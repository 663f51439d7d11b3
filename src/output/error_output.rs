//! Colored error, warning and note output on stderr.
//!
//! Format: `✖ Type: message` / `  × detail` / `  help: suggestion`.

use std::io::{IsTerminal, Write};

use crate::error::BazelCheckError;

use super::ColorMode;
use super::ansi;

/// Error output formatter with color support.
#[derive(Debug, Clone, Copy)]
pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: mode.use_colors(std::io::stderr().is_terminal()),
        }
    }

    /// Auto-detects color support on stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ColorMode::Auto)
    }

    #[cfg(test)]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Print a crate error with its category, cause and hint.
    pub fn print_bazel_error(&self, error: &BazelCheckError) {
        let mut stderr = std::io::stderr().lock();
        self.write_error(
            &mut stderr,
            error.error_type(),
            &error.message(),
            error.detail().as_deref(),
            error.suggestion(),
        );
    }

    pub fn print_warning(&self, message: &str, detail: Option<&str>) {
        let mut stderr = std::io::stderr().lock();
        self.write_warning(&mut stderr, message, detail, None);
    }

    pub fn print_note(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        self.write_note(&mut stderr, message);
    }

    /// Writes an error to `w`.
    pub fn write_error<W: Write>(
        &self,
        w: &mut W,
        error_type: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        // Failing to report on stderr is not itself reportable.
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{}✖ {error_type}:{} {message}",
                ansi::BOLD,
                ansi::RED,
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "✖ {error_type}: {message}");
        }
        self.write_tail(w, detail, suggestion);
    }

    /// Writes a warning to `w`.
    pub fn write_warning<W: Write>(
        &self,
        w: &mut W,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{}⚠ Warning:{} {message}",
                ansi::BOLD,
                ansi::YELLOW,
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "⚠ Warning: {message}");
        }
        self.write_tail(w, detail, suggestion);
    }

    /// Writes an informational note to `w`.
    pub fn write_note<W: Write>(&self, w: &mut W, message: &str) {
        if self.use_colors {
            let _ = writeln!(w, "{}note:{} {message}", ansi::CYAN, ansi::RESET);
        } else {
            let _ = writeln!(w, "note: {message}");
        }
    }

    fn write_tail<W: Write>(&self, w: &mut W, detail: Option<&str>, suggestion: Option<&str>) {
        if let Some(d) = detail {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {d}");
            }
        }

        if let Some(s) = suggestion {
            if self.use_colors {
                let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
            } else {
                let _ = writeln!(w, "  help: {s}");
            }
        }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

/// Prints a crate error using auto-detected color mode.
pub fn print_bazel_error(error: &BazelCheckError) {
    ErrorOutput::stderr().print_bazel_error(error);
}

/// Prints an error with detail and suggestion.
pub fn print_error_full(
    error_type: &str,
    message: &str,
    detail: Option<&str>,
    suggestion: Option<&str>,
) {
    let mut stderr = std::io::stderr().lock();
    ErrorOutput::stderr().write_error(&mut stderr, error_type, message, detail, suggestion);
}

pub fn print_warning(message: &str, detail: Option<&str>) {
    ErrorOutput::stderr().print_warning(message, detail);
}

pub fn print_note(message: &str) {
    ErrorOutput::stderr().print_note(message);
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
