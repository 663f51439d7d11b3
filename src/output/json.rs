use serde::Serialize;

use crate::checker::CheckReport;
use crate::diagnostics::{Diagnostic, Severity};
use crate::error::Result;
use crate::targets::TargetId;
use crate::verify::VerificationReport;

use super::OutputFormatter;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct CheckOutput<'a> {
    workspace: String,
    targets: &'a [TargetId],
    command: String,
    exit_code: Option<i32>,
    summary: Summary,
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
struct Summary {
    errors: usize,
    warnings: usize,
    infos: usize,
}

impl Summary {
    fn of(diagnostics: &[Diagnostic]) -> Self {
        diagnostics.iter().fold(
            Self {
                errors: 0,
                warnings: 0,
                infos: 0,
            },
            |mut summary, d| {
                match d.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                    Severity::Info => summary.infos += 1,
                }
                summary
            },
        )
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, report: &CheckReport) -> Result<String> {
        let output = CheckOutput {
            workspace: report.workspace.root().display().to_string(),
            targets: report.targets.as_slice(),
            command: report.invocation.display_command(),
            exit_code: report.exit_code,
            summary: Summary::of(&report.diagnostics),
            diagnostics: &report.diagnostics,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn format_verification(&self, report: &VerificationReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
