//! Diagnostic formats: turning build output into file/line/column findings.
//!
//! The build tool only forwards whatever the compiler prints. Each
//! [`DiagnosticFormat`] knows the flag that makes the compiler emit a
//! machine-readable format and how to read it back.

mod rustc;

pub use rustc::RustcJson;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::workspace::Workspace;

/// Names accepted by `diagnostics.format`.
pub const KNOWN_FORMATS: &[&str] = &[RustcJson::NAME];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// A single finding, addressed by file, line and column (both 1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A compiler output format reachable through the build tool.
pub trait DiagnosticFormat: std::fmt::Debug + Send + Sync {
    /// Name used in configuration.
    fn name(&self) -> &'static str;

    /// Build flag selecting this format.
    fn format_flag(&self) -> &'static str;

    /// Drop everything in the raw build output that is not part of the format.
    fn filter(&self, raw: &str) -> String;

    /// Parse filtered output. Relative file names resolve against the workspace root.
    ///
    /// # Errors
    /// Returns [`crate::BazelCheckError::DiagnosticParse`] on malformed records.
    fn parse(&self, filtered: &str, workspace: &Workspace) -> Result<Vec<Diagnostic>>;

    /// Long-form explanation for a diagnostic, if the format carries one.
    fn explain(&self, diagnostic: &Diagnostic) -> Option<String>;
}

/// Look up a built-in format by its configuration name.
#[must_use]
pub fn format_by_name(name: &str) -> Option<Arc<dyn DiagnosticFormat>> {
    match name {
        RustcJson::NAME => Some(Arc::new(RustcJson)),
        _ => None,
    }
}

/// Run the filter then parse stages over captured build output.
///
/// # Errors
/// Propagates the format's parse failure unchanged.
pub fn collect(
    format: &dyn DiagnosticFormat,
    raw: &str,
    workspace: &Workspace,
) -> Result<Vec<Diagnostic>> {
    let filtered = format.filter(raw);
    format.parse(&filtered, workspace)
}
