// src/compiler/mod.rs
//! Per-file compilation.
//!
//! A [`Compiler`] never fails: unreadable files, a missing plugin and
//! compile-time exceptions all come back as a [`FileCheckResult`] carrying an
//! `error`, so a run always covers every scanned file.

mod node;
pub mod plugin;

pub use node::NodeCompiler;

use crate::types::FileCheckResult;
use std::path::{Path, PathBuf};

pub const PLUGIN_UNAVAILABLE: &str = "babel-plugin-react-compiler is not available";

/// Source dialect handed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Flow,
    TypeScript,
}

impl Language {
    /// `.js`, `.jsx` and `.mjs` parse as Flow; everything else as TypeScript.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("js" | "jsx" | "mjs") => Self::Flow,
            _ => Self::TypeScript,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flow => "flow",
            Self::TypeScript => "typescript",
        }
    }
}

pub trait Compiler {
    /// Checks one file. `file_path` is reported as given; relative paths
    /// are read from `workspace`.
    fn check(&self, file_path: &str, workspace: &Path) -> FileCheckResult;
}

/// Checks every path in order.
#[must_use]
pub fn check_files(
    paths: &[String],
    workspace: &Path,
    compiler: &dyn Compiler,
) -> Vec<FileCheckResult> {
    paths
        .iter()
        .map(|path| compiler.check(path, workspace))
        .collect()
}

pub(crate) fn absolute(file_path: &str, workspace: &Path) -> PathBuf {
    let path = Path::new(file_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.join(path)
    }
}
