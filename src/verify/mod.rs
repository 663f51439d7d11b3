//! Health report: was a workspace root found, and does any target own the file?

use serde::Serialize;

use crate::error::BazelCheckError;
use crate::targets::TargetSet;
use crate::workspace::Workspace;

pub const ROOT_LABEL: &str = "Bazel workspace root";
pub const TARGETS_LABEL: &str = "Bazel targets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyStatus {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub label: String,
    pub message: String,
    pub status: VerifyStatus,
}

impl VerificationResult {
    fn new(label: &str, message: impl Into<String>, status: VerifyStatus) -> Self {
        Self {
            label: label.to_string(),
            message: message.into(),
            status,
        }
    }
}

/// The two-entry report: workspace root, then targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub root: VerificationResult,
    pub targets: VerificationResult,
}

impl VerificationReport {
    #[must_use]
    pub fn entries(&self) -> [&VerificationResult; 2] {
        [&self.root, &self.targets]
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries()
            .iter()
            .any(|entry| entry.status == VerifyStatus::Error)
    }
}

/// What the target lookup produced, as seen by the report.
#[derive(Debug)]
pub enum TargetLookup {
    /// Never attempted because there is no workspace.
    Skipped,
    Found(TargetSet),
    NotFound,
    Failed(BazelCheckError),
}

/// Turns lookup outcomes into a [`VerificationReport`].
///
/// Missing root is error-level; missing targets is warning-level because a
/// file inside a workspace may legitimately belong to no target.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerificationReporter;

impl VerificationReporter {
    #[must_use]
    pub fn report(workspace: Option<&Workspace>, targets: &TargetLookup) -> VerificationReport {
        let root = workspace.map_or_else(
            || VerificationResult::new(ROOT_LABEL, "not found", VerifyStatus::Error),
            |ws| VerificationResult::new(ROOT_LABEL, ws.root().display().to_string(), VerifyStatus::Success),
        );

        let targets = match targets {
            TargetLookup::Found(set) => {
                VerificationResult::new(TARGETS_LABEL, set.joined(), VerifyStatus::Success)
            }
            TargetLookup::NotFound => {
                VerificationResult::new(TARGETS_LABEL, "not found", VerifyStatus::Warning)
            }
            TargetLookup::Skipped => VerificationResult::new(
                TARGETS_LABEL,
                "not found (no workspace root)",
                VerifyStatus::Warning,
            ),
            TargetLookup::Failed(err) => {
                let message = err
                    .detail()
                    .map_or_else(|| err.to_string(), |detail| format!("{err}: {detail}"));
                VerificationResult::new(TARGETS_LABEL, message, VerifyStatus::Error)
            }
        };

        VerificationReport { root, targets }
    }
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
