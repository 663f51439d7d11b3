use std::collections::HashMap;

use crate::error::{BazelCheckError, Result};
use crate::filesystem::{FileSystem, RealFileSystem};
use crate::process::{CommandRunner, SystemCommandRunner};

use super::definition::CheckerDefinition;
use super::request::CheckRequest;

/// Checkers known to the process, populated once at startup.
///
/// Nothing registers itself: the entry point builds each definition from
/// the loaded configuration and hands it over explicitly.
#[derive(Debug)]
pub struct CheckerRegistry<R: CommandRunner = SystemCommandRunner, F: FileSystem = RealFileSystem> {
    checkers: Vec<CheckerDefinition<R, F>>,
    name_map: HashMap<String, usize>,
}

impl<R: CommandRunner, F: FileSystem> Default for CheckerRegistry<R, F> {
    fn default() -> Self {
        Self {
            checkers: Vec::new(),
            name_map: HashMap::new(),
        }
    }
}

impl<R: CommandRunner, F: FileSystem> CheckerRegistry<R, F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a checker.
    ///
    /// # Errors
    /// Returns [`BazelCheckError::Config`] if a checker with the same name is
    /// already registered.
    pub fn register(&mut self, checker: CheckerDefinition<R, F>) -> Result<()> {
        if self.name_map.contains_key(checker.name()) {
            return Err(BazelCheckError::Config(format!(
                "checker '{}' is already registered",
                checker.name()
            )));
        }
        tracing::debug!(name = checker.name(), "registered checker");
        self.name_map
            .insert(checker.name().to_string(), self.checkers.len());
        self.checkers.push(checker);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CheckerDefinition<R, F>> {
        self.name_map.get(name).map(|&idx| &self.checkers[idx])
    }

    /// First registered checker enabled for the request's file.
    #[must_use]
    pub fn checker_for(&self, request: &CheckRequest) -> Option<&CheckerDefinition<R, F>> {
        self.checkers
            .iter()
            .find(|checker| checker.is_enabled(request))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckerDefinition<R, F>> {
        self.checkers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}
