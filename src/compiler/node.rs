// src/compiler/node.rs
//! Runs the compiler plugin through a bundled Node.js bridge script.

use super::{absolute, plugin, Compiler, Language, PLUGIN_UNAVAILABLE};
use crate::types::{
    CompilationResult, DiagnosticEvent, DiagnosticKind, EventDetail, FileCheckResult,
};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

const BRIDGE: &str = include_str!("bridge.js");

#[derive(Deserialize)]
struct BridgeOutput {
    events: Vec<Value>,
}

/// Compiles files with `node` and the workspace's `babel-plugin-react-compiler`.
#[derive(Debug, Clone)]
pub struct NodeCompiler {
    node: PathBuf,
    plugin_path: Option<PathBuf>,
}

impl Default for NodeCompiler {
    fn default() -> Self {
        Self {
            node: PathBuf::from("node"),
            plugin_path: None,
        }
    }
}

impl NodeCompiler {
    #[must_use]
    pub fn new(plugin_path: Option<PathBuf>) -> Self {
        Self {
            plugin_path,
            ..Self::default()
        }
    }

    /// Uses a specific `node` executable instead of the one on `PATH`.
    #[must_use]
    pub fn with_node(mut self, node: impl Into<PathBuf>) -> Self {
        self.node = node.into();
        self
    }

    fn run_bridge(
        &self,
        plugin_dir: &Path,
        filename: &Path,
        source: &str,
        workspace: &Path,
    ) -> Result<CompilationResult, String> {
        let language = Language::for_path(&filename.to_string_lossy());
        let mut child = Command::new(&self.node)
            .arg("-e")
            .arg(BRIDGE)
            .arg(plugin_dir)
            .arg(filename)
            .arg(language.as_str())
            .arg(workspace)
            .current_dir(workspace)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to start {}: {e}", self.node.display()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| format!("failed to send source to node: {e}"))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| format!("failed to wait for node: {e}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            return Err(if message.is_empty() {
                format!("node exited with {}", output.status)
            } else {
                message.to_string()
            });
        }

        decode_output(&output.stdout)
    }
}

/// Parses the bridge's `{"events": [...]}` document.
///
/// Events are decoded one by one. An event that does not fit the model is
/// kept as an `Unknown` failure so it still counts against the gate.
fn decode_output(stdout: &[u8]) -> Result<CompilationResult, String> {
    let parsed: BridgeOutput = serde_json::from_slice(stdout)
        .map_err(|e| format!("unreadable compiler output: {e}"))?;
    Ok(parsed.events.into_iter().map(decode_event).collect())
}

fn decode_event(value: Value) -> DiagnosticEvent {
    let name = value
        .get("fnName")
        .and_then(Value::as_str)
        .map(str::to_string);
    match serde_json::from_value::<DiagnosticEvent>(value) {
        Ok(event) => event,
        Err(e) => {
            warn!("Unreadable compiler event: {e}");
            DiagnosticEvent {
                function_name: name,
                detail: Some(EventDetail {
                    reason: Some(format!("Unreadable compiler event: {e}")),
                    ..EventDetail::default()
                }),
                ..DiagnosticEvent::new(DiagnosticKind::Unknown, None, None)
            }
        }
    }
}

impl Compiler for NodeCompiler {
    fn check(&self, file_path: &str, workspace: &Path) -> FileCheckResult {
        let full_path = absolute(file_path, workspace);

        let source = match fs::read_to_string(&full_path) {
            Ok(s) => s,
            Err(e) => {
                return FileCheckResult::errored(file_path, format!("Failed to read file: {e}"))
            }
        };

        let Some(plugin) = plugin::load(workspace, self.plugin_path.as_deref()) else {
            return FileCheckResult::errored(file_path, PLUGIN_UNAVAILABLE);
        };

        match self.run_bridge(&plugin.dir, &full_path, &source, workspace) {
            Ok(result) => {
                debug!(
                    file = file_path,
                    passed = result.successes.len(),
                    failed = result.failures.len(),
                    "compiled"
                );
                FileCheckResult::compiled(file_path, result)
            }
            Err(message) => {
                FileCheckResult::errored(file_path, format!("Compilation error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_read_error() {
        let d = tempfile::tempdir().unwrap();
        let result = NodeCompiler::default().check("NonExistent.tsx", d.path());
        assert!(!result.success);
        assert_eq!(result.file_path, "NonExistent.tsx");
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .starts_with("Failed to read file:"));
        assert!(result.compilation_result.is_empty());
    }

    #[test]
    fn test_decode_plugin_events() {
        let stdout = br#"{"events": [
            {"kind": "CompileSuccess", "filename": "/w/src/Page.tsx", "fnName": "Page",
             "fnLoc": {"start": {"line": 3, "column": 0, "index": 40}, "end": {"line": 12, "column": 1},
                       "filename": "/w/src/Page.tsx", "identifierName": "Page"},
             "memoSlots": 4, "memoBlocks": 2, "memoValues": 2, "prunedMemoBlocks": 0, "prunedMemoValues": 0},
            {"kind": "CompileError", "filename": "/w/src/Page.tsx", "fnName": null,
             "fnLoc": {"start": {"line": 20}, "end": {"line": 30}},
             "detail": {"options": {"category": "Hooks", "reason": "Hooks must be called unconditionally",
                                    "description": null, "suggestions": null, "loc": null}}},
            {"kind": "CompileError", "filename": "/w/src/Page.tsx", "fnName": "Form",
             "fnLoc": {"start": {"line": 40}, "end": {"line": 55}},
             "detail": {"options": {"reason": "Ref values cannot be accessed during render",
                                    "suggestions": [{"description": "Move into an effect", "op": 1, "range": [900, 920]}]}}}
        ]}"#;
        let result = decode_output(stdout).unwrap();
        assert_eq!(result.successes.len(), 1);
        assert_eq!(result.successes[0].name(), "Page");
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[0].name(), "anonymous");
        assert_eq!(result.failures[0].reason(), "Hooks must be called unconditionally");
        assert_eq!(result.failures[1].suggestions(), ["Move into an effect"]);
    }

    #[test]
    fn test_malformed_event_counts_as_failure() {
        let stdout = br#"{"events": [
            {"kind": "CompileSuccess", "fnName": "Ok", "fnLoc": {"start": {"line": 1}}},
            {"kind": "CompileError", "fnName": "Odd", "fnLoc": {"start": {"line": "ten"}}}
        ]}"#;
        let result = decode_output(stdout).unwrap();
        assert_eq!(result.successes.len(), 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].kind, DiagnosticKind::Unknown);
        assert_eq!(result.failures[0].name(), "Odd");
        assert!(result.failures[0].reason().starts_with("Unreadable compiler event"));
    }

    #[test]
    fn test_non_json_output_is_an_error() {
        assert!(decode_output(b"Segmentation fault").is_err());
    }

    #[test]
    fn test_unstartable_node_is_compilation_error() {
        let d = tempfile::tempdir().unwrap();
        let plugin_dir = d.path().join("plugin");
        fs::create_dir_all(&plugin_dir).unwrap();
        fs::write(d.path().join("A.tsx"), "export const A = () => null;").unwrap();

        let compiler = NodeCompiler::default().with_node(d.path().join("no-such-node"));
        let err = compiler
            .run_bridge(&plugin_dir, &d.path().join("A.tsx"), "", d.path())
            .unwrap_err();
        assert!(err.starts_with("failed to start"));
    }
}
