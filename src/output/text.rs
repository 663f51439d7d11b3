use std::fmt::Write;
use std::io::IsTerminal;

use crate::checker::CheckReport;
use crate::diagnostics::{Diagnostic, Severity};
use crate::error::Result;
use crate::verify::{VerificationReport, VerificationResult, VerifyStatus};

use super::{ColorMode, OutputFormatter, ansi, display_path};

/// Compiler-style lines: `path:line:col: severity[code]: message`.
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    use_colors: bool,
    show_explanations: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: mode.use_colors(std::io::stdout().is_terminal()),
            show_explanations: false,
        }
    }

    /// Append the long-form explanation below diagnostics that carry one.
    #[must_use]
    pub const fn with_explanations(mut self, show: bool) -> Self {
        self.show_explanations = show;
        self
    }

    #[cfg(test)]
    pub(crate) const fn plain() -> Self {
        Self {
            use_colors: false,
            show_explanations: false,
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
            Severity::Info => ansi::CYAN,
        }
    }

    const fn status_icon(status: VerifyStatus) -> (&'static str, &'static str) {
        match status {
            VerifyStatus::Success => ("✓", ansi::GREEN),
            VerifyStatus::Warning => ("⚠", ansi::YELLOW),
            VerifyStatus::Error => ("✗", ansi::RED),
        }
    }

    fn write_diagnostic(&self, out: &mut String, report: &CheckReport, diagnostic: &Diagnostic) {
        let label = diagnostic.code.as_ref().map_or_else(
            || diagnostic.severity.to_string(),
            |code| format!("{}[{code}]", diagnostic.severity),
        );
        let mut lines = diagnostic.message.lines();
        let first = lines.next().unwrap_or_default();

        let _ = writeln!(
            out,
            "{}:{}:{}: {}: {first}",
            display_path(&report.workspace, &diagnostic.file),
            diagnostic.line,
            diagnostic.column,
            self.paint(&label, Self::severity_color(diagnostic.severity)),
        );
        for line in lines {
            let _ = writeln!(out, "    {line}");
        }

        if self.show_explanations
            && let Some(explanation) = &diagnostic.explanation
        {
            out.push('\n');
            for line in explanation.trim_end().lines() {
                let _ = writeln!(out, "    | {line}");
            }
            out.push('\n');
        }
    }

    fn write_summary(&self, out: &mut String, report: &CheckReport) {
        let count = |severity: Severity| {
            report
                .diagnostics
                .iter()
                .filter(|d| d.severity == severity)
                .count()
        };
        let errors = count(Severity::Error);
        let warnings = count(Severity::Warning);

        let (icon, color) = if errors > 0 {
            ("✗", ansi::RED)
        } else if warnings > 0 {
            ("⚠", ansi::YELLOW)
        } else {
            ("✓", ansi::GREEN)
        };
        let _ = writeln!(
            out,
            "{} {} ({})",
            self.paint(icon, color),
            summary_counts(errors, warnings),
            report.targets.joined()
        );
    }

    fn write_entry(&self, out: &mut String, entry: &VerificationResult) {
        let (icon, color) = Self::status_icon(entry.status);
        let _ = writeln!(
            out,
            "{} {}: {}",
            self.paint(icon, color),
            entry.label,
            entry.message
        );
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn summary_counts(errors: usize, warnings: usize) -> String {
    match (errors, warnings) {
        (0, 0) => "no errors or warnings".to_string(),
        (e, 0) => plural(e, "error"),
        (0, w) => plural(w, "warning"),
        (e, w) => format!("{}, {}", plural(e, "error"), plural(w, "warning")),
    }
}

impl OutputFormatter for TextFormatter {
    fn format_check(&self, report: &CheckReport) -> Result<String> {
        let mut out = String::new();
        for diagnostic in &report.diagnostics {
            self.write_diagnostic(&mut out, report, diagnostic);
        }
        self.write_summary(&mut out, report);
        Ok(out)
    }

    fn format_verification(&self, report: &VerificationReport) -> Result<String> {
        let mut out = String::new();
        for entry in report.entries() {
            self.write_entry(&mut out, entry);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
