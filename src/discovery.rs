// src/discovery.rs
//! Finds the component files a run should compile.

use crate::error::{HealthcheckError, Result};
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["**/*.jsx", "**/*.tsx"];

pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "**/node_modules/**",
    "**/*.test.{js,jsx,ts,tsx}",
    "**/*.spec.{js,jsx,ts,tsx}",
    "**/__tests__/**",
    "**/__mocks__/**",
    "**/dist/**",
    "**/build/**",
    "**/.next/**",
];

const ALWAYS_PRUNE: &[&str] = &[".git"];

/// Include patterns never descend into dot-directories or match dotfiles.
const INCLUDE_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

const EXCLUDE_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled include/exclude sets.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    prune: Vec<String>,
}

impl FileMatcher {
    /// Compiles the patterns, expanding `{a,b}` alternatives.
    ///
    /// # Errors
    /// Returns error if any expanded pattern is not a valid glob.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        let prune = exclude
            .iter()
            .filter_map(|p| prunable_dir(p.as_ref()))
            .chain(ALWAYS_PRUNE.iter().copied())
            .map(str::to_string)
            .collect();
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
            prune,
        })
    }

    /// Tests a relative, forward-slash path.
    #[must_use]
    pub fn is_match(&self, relative: &str) -> bool {
        self.include
            .iter()
            .any(|p| p.matches_with(relative, INCLUDE_OPTIONS))
            && !self
                .exclude
                .iter()
                .any(|p| p.matches_with(relative, EXCLUDE_OPTIONS))
    }

    fn should_prune(&self, dir_name: &str) -> bool {
        self.prune.iter().any(|p| p == dir_name)
    }
}

/// Scans `cwd` and returns matching paths relative to it, sorted and unique.
///
/// # Errors
/// Returns error if a pattern is invalid or `cwd` cannot be read.
pub fn scan<S: AsRef<str>>(include: &[S], exclude: &[S], cwd: &Path) -> Result<Vec<String>> {
    let matcher = FileMatcher::new(include, exclude)?;
    if !cwd.is_dir() {
        return Err(HealthcheckError::Config(format!(
            "working directory does not exist: {}",
            cwd.display()
        )));
    }

    let walker = WalkDir::new(cwd)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !matcher.should_prune(&e.file_name().to_string_lossy())
        });

    let mut found: BTreeSet<String> = BTreeSet::new();
    let mut errors = 0usize;
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                debug!("walk error: {e}");
                errors += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(cwd) else {
            continue;
        };
        let rel = normalize_path(rel);
        if matcher.is_match(&rel) {
            found.insert(rel);
        }
    }

    if errors > 0 {
        warn!("Encountered {errors} errors during file walk");
    }
    Ok(found.into_iter().collect())
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>> {
    let mut compiled = Vec::new();
    for raw in patterns {
        for expanded in expand_braces(raw.as_ref()) {
            compiled.push(Pattern::new(&expanded)?);
        }
    }
    Ok(compiled)
}

/// `**/name/**` with a literal `name` excludes whole directories, so the walk can skip them.
fn prunable_dir(pattern: &str) -> Option<&str> {
    let name = pattern.strip_prefix("**/")?.strip_suffix("/**")?;
    let literal = !name.is_empty() && !name.contains(['*', '?', '[', '{', '/']);
    literal.then_some(name)
}

/// Expands shell-style alternatives: `a.{js,ts}` becomes `a.js`, `a.ts`.
#[must_use]
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = matching_brace(pattern, open) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let body = &pattern[open + 1..close];
    let suffix = &pattern[close + 1..];

    let mut out = Vec::new();
    for alt in split_top_level(body) {
        for tail in expand_braces(&format!("{alt}{suffix}")) {
            out.push(format!("{prefix}{tail}"));
        }
    }
    out
}

fn matching_brace(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices().skip_while(|(i, _)| *i < open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}
