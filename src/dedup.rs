// src/dedup.rs
//! Failure grouping strategies.
//!
//! The compiler may report one function several times (once per violated
//! rule, or again on a retry pass). Two strategies exist and are kept apart:
//!
//! - [`unique_failures`]: folds events sharing a [`FailureKey`] into one entry
//!   with an occurrence count. Used by the aggregator and the console report.
//! - [`raw_failures`]: every event, untouched. Used by the Markdown report and
//!   the annotation generator so reviewers see each occurrence.
//!
//! Keys are built only from stable fields so that any permutation of the same
//! events yields the same key set.

use crate::types::{DiagnosticEvent, FileCheckResult};
use std::collections::HashMap;
use std::fmt;

/// Identity of one logical issue: `path|line|name|reason`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FailureKey {
    file_path: String,
    line: Option<u32>,
    name: String,
    reason: String,
}

impl FailureKey {
    #[must_use]
    pub fn new(file_path: &str, event: &DiagnosticEvent) -> Self {
        Self {
            file_path: file_path.to_string(),
            line: event.start_line(),
            name: event.name().to_string(),
            reason: event.reason().to_string(),
        }
    }
}

impl fmt::Display for FailureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}|{line}|{}|{}", self.file_path, self.name, self.reason),
            None => write!(f, "{}|?|{}|{}", self.file_path, self.name, self.reason),
        }
    }
}

/// First occurrence of a logical issue plus how many times it was reported.
#[derive(Debug, Clone, Copy)]
pub struct GroupedFailure<'a> {
    pub file_path: &'a str,
    pub event: &'a DiagnosticEvent,
    pub count: usize,
}

/// Collapses repeated failures across `files`, preserving first-seen order.
#[must_use]
pub fn unique_failures<'a, I>(files: I) -> Vec<GroupedFailure<'a>>
where
    I: IntoIterator<Item = &'a FileCheckResult>,
{
    let mut order: Vec<GroupedFailure<'a>> = Vec::new();
    let mut index: HashMap<FailureKey, usize> = HashMap::new();

    for (path, event) in raw_failures(files) {
        let key = FailureKey::new(path, event);
        if let Some(&slot) = index.get(&key) {
            order[slot].count += 1;
        } else {
            index.insert(key, order.len());
            order.push(GroupedFailure { file_path: path, event, count: 1 });
        }
    }
    order
}

/// Number of distinct logical issues in one file.
#[must_use]
pub fn unique_failure_count(file: &FileCheckResult) -> usize {
    unique_failures(std::iter::once(file)).len()
}

/// Every failure event paired with its file, in file then event order.
pub fn raw_failures<'a, I>(files: I) -> impl Iterator<Item = (&'a str, &'a DiagnosticEvent)>
where
    I: IntoIterator<Item = &'a FileCheckResult>,
{
    files.into_iter().flat_map(|file| {
        file.compilation_result
            .failures
            .iter()
            .map(move |event| (file.file_path.as_str(), event))
    })
}
