use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BazelCheckError, Result};
use crate::workspace::Workspace;

use super::{Diagnostic, DiagnosticFormat, Severity};

/// rustc's JSON diagnostics, enabled through `rules_rust`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustcJson;

impl RustcJson {
    pub const NAME: &'static str = "rustc-json";
    pub const FLAG: &'static str = "--@rules_rust//:error_format=json";
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(rename = "$message_type")]
    message_type: Option<String>,
    #[serde(default)]
    message: String,
    code: Option<Code>,
    #[serde(default)]
    level: String,
    #[serde(default)]
    spans: Vec<Span>,
    #[serde(default)]
    children: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Code {
    code: String,
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Span {
    file_name: String,
    line_start: u32,
    column_start: u32,
    #[serde(default)]
    is_primary: bool,
    expansion: Option<Box<Expansion>>,
}

#[derive(Debug, Deserialize)]
struct Expansion {
    span: Span,
}

impl Span {
    /// Spans inside macro definitions point at pseudo files like
    /// `<::core::macros>`; report the call site instead.
    fn user_facing(&self) -> &Self {
        let mut span = self;
        while span.file_name.starts_with('<')
            && let Some(expansion) = &span.expansion
        {
            span = &expansion.span;
        }
        span
    }
}

fn severity_for(level: &str) -> Severity {
    match level {
        "error" | "error: internal compiler error" => Severity::Error,
        "warning" => Severity::Warning,
        _ => Severity::Info,
    }
}

fn resolve_file(workspace: &Workspace, file_name: &str) -> std::path::PathBuf {
    let path = Path::new(file_name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.root().join(path)
    }
}

impl RustcJson {
    fn convert(message: &Message, workspace: &Workspace, out: &mut Vec<Diagnostic>) {
        let Some(primary) = message.spans.iter().find(|span| span.is_primary) else {
            // "aborting due to N previous errors" and friends carry no location.
            return;
        };
        let span = primary.user_facing();

        let mut text = message.message.clone();
        for child in message.children.iter().filter(|c| c.spans.is_empty()) {
            text.push('\n');
            text.push_str(&child.level);
            text.push_str(": ");
            text.push_str(&child.message);
        }

        out.push(Diagnostic {
            file: resolve_file(workspace, &span.file_name),
            line: span.line_start,
            column: span.column_start,
            severity: severity_for(&message.level),
            message: text,
            code: message.code.as_ref().map(|code| code.code.clone()),
            explanation: message
                .code
                .as_ref()
                .and_then(|code| code.explanation.clone()),
        });

        for child in &message.children {
            if let Some(span) = child.spans.iter().find(|span| span.is_primary) {
                let span = span.user_facing();
                out.push(Diagnostic {
                    file: resolve_file(workspace, &span.file_name),
                    line: span.line_start,
                    column: span.column_start,
                    severity: Severity::Info,
                    message: format!("{}: {}", child.level, child.message),
                    code: None,
                    explanation: None,
                });
            }
        }
    }
}

impl DiagnosticFormat for RustcJson {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn format_flag(&self) -> &'static str {
        Self::FLAG
    }

    fn filter(&self, raw: &str) -> String {
        raw.lines()
            .map(str::trim)
            .filter(|line| line.starts_with('{'))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn parse(&self, filtered: &str, workspace: &Workspace) -> Result<Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();
        for (index, line) in filtered.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let message: Message = serde_json::from_str(line).map_err(|e| {
                BazelCheckError::DiagnosticParse(format!("record {}: {e}", index + 1))
            })?;
            if message
                .message_type
                .as_deref()
                .is_some_and(|kind| kind != "diagnostic")
                || message.level.is_empty()
            {
                continue;
            }
            Self::convert(&message, workspace, &mut diagnostics);
        }

        // Several targets compiling the same source report the same problem.
        let mut seen = HashSet::new();
        diagnostics.retain(|d| {
            seen.insert((
                d.file.clone(),
                d.line,
                d.column,
                d.severity,
                d.message.clone(),
            ))
        });
        Ok(diagnostics)
    }

    fn explain(&self, diagnostic: &Diagnostic) -> Option<String> {
        diagnostic.explanation.clone()
    }
}

#[cfg(test)]
#[path = "rustc_tests.rs"]
mod tests;
