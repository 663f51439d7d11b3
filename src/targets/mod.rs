//! Owning-target resolution through `bazel query`.

mod resolver;

pub use resolver::{QUERY_UI_FLAGS, TargetResolver, parse_target_lines, query_expression};

use serde::Serialize;

/// Opaque Bazel label, passed through exactly as the build tool printed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Non-empty, ordered list of targets. A build command can only be built
/// from one of these, so an empty build is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet(Vec<TargetId>);

impl TargetSet {
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn new(targets: Vec<TargetId>) -> Option<Self> {
        if targets.is_empty() {
            None
        } else {
            Some(Self(targets))
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TargetId] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetId> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with slices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<TargetId> {
        self.0
    }

    /// Labels joined by single spaces, for reports.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(TargetId::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a TargetId;
    type IntoIter = std::slice::Iter<'a, TargetId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_set_rejects_empty_list() {
        assert!(TargetSet::new(Vec::new()).is_none());
    }

    #[test]
    fn target_set_keeps_order() {
        let set = TargetSet::new(vec![TargetId::new("//pkg:b"), TargetId::new("//pkg:a")]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.joined(), "//pkg:b //pkg:a");
        let labels: Vec<&str> = set.iter().map(TargetId::as_str).collect();
        assert_eq!(labels, vec!["//pkg:b", "//pkg:a"]);
    }

    #[test]
    fn target_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&TargetId::new("//src:lib")).unwrap();
        assert_eq!(json, "\"//src:lib\"");
    }
}
