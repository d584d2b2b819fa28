// tests/cli_exit.rs - binary behavior and exit codes
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SAVED_RESULT: &str = r#"{
  "summary": { "totalFiles": 99, "totalComponents": 0, "passedComponents": 0,
               "failedComponents": 0, "filesWithErrors": 0, "filesFullyOptimized": 0 },
  "results": [
    {
      "filePath": "src/Bad.tsx",
      "success": true,
      "compilationResult": {
        "successfulCompilations": [],
        "failedCompilations": [
          {
            "filename": "src/Bad.tsx",
            "kind": "CompileError",
            "fnName": "BadComponent",
            "fnLoc": { "start": { "line": 10, "column": 0 }, "end": { "line": 20, "column": 1 } },
            "detail": { "reason": "Mutating a ref during render",
                        "suggestions": ["Move mutation to useEffect"] }
          }
        ]
      }
    }
  ]
}"#;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_react-compiler-healthcheck"));
    cmd.env_clear().arg("--no-color");
    cmd
}

fn run(cmd: &mut Command) -> (i32, String) {
    let Output { status, stdout, .. } = cmd.output().unwrap();
    (status.code().unwrap_or(-1), String::from_utf8_lossy(&stdout).into_owned())
}

fn saved(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("result.json");
    fs::write(&path, SAVED_RESULT).unwrap();
    path
}

fn project(files: &[&str]) -> TempDir {
    let d = tempfile::tempdir().unwrap();
    for file in files {
        let path = d.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export default function A() { return null; }").unwrap();
    }
    d
}

#[test]
fn test_report_console_recomputes_summary() {
    let d = tempfile::tempdir().unwrap();
    let (code, out) = run(bin().args(["report", "--input"]).arg(saved(&d)));
    assert_eq!(code, 0);
    assert!(out.contains("Files scanned: 1"));
    assert!(out.contains("src/Bad.tsx:10 - BadComponent"));
    assert!(out.contains("→ Move mutation to useEffect"));
    assert!(out.contains("✗ 1 component(s) failed optimization"));
}

#[test]
fn test_report_markdown_links() {
    let d = tempfile::tempdir().unwrap();
    let (code, out) = run(bin()
        .args(["report", "--format", "markdown", "--input"])
        .arg(saved(&d))
        .args(["--repo-url", "https://github.com/acme/web", "--commit-sha", "abc123"]));
    assert_eq!(code, 0);
    assert!(out.starts_with("## ❌ React Compiler Healthcheck"));
    assert!(out.contains("https://github.com/acme/web/blob/abc123/src/Bad.tsx#L10"));
}

#[test]
fn test_report_annotations() {
    let d = tempfile::tempdir().unwrap();
    let (code, out) = run(bin().args(["report", "--format", "annotations", "--input"]).arg(saved(&d)));
    assert_eq!(code, 0);
    assert!(out.starts_with("::warning file=src/Bad.tsx,line=10,endLine=20,"));
}

#[test]
fn test_report_bad_input_is_invalid() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let (code, _) = run(bin().args(["report", "--input"]).arg(&path));
    assert_eq!(code, 2);
}

#[test]
fn test_scan_lists_files() {
    let d = project(&["src/B.tsx", "src/A.jsx", "src/A.test.jsx"]);
    let (code, out) = run(bin().arg("scan").arg("--cwd").arg(d.path()));
    assert_eq!(code, 0);
    assert_eq!(out.lines().collect::<Vec<_>>(), ["src/A.jsx", "src/B.tsx"]);
}

#[test]
fn test_check_empty_project_passes() {
    let d = project(&[]);
    let json = d.path().join("out.json");
    let (code, out) = run(bin()
        .arg("check")
        .arg("--cwd")
        .arg(d.path())
        .arg("--json-out")
        .arg(&json));
    assert_eq!(code, 0);
    assert!(out.contains("Files scanned: 0"));
    assert!(out.contains("Pass rate: 0.0%"));
    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(written["summary"]["totalFiles"], 0);
}

#[test]
fn test_check_without_plugin_reports_file_errors() {
    let d = project(&["src/A.tsx"]);
    let comment = d.path().join("comment.md");
    let markdown = d.path().join("report.md");
    let (code, out) = run(bin()
        .arg("check")
        .arg("--cwd")
        .arg(d.path())
        .args(["--plugin-path", "missing/plugin"])
        .arg("--comment-out")
        .arg(&comment)
        .arg("--markdown-out")
        .arg(&markdown));

    // File-level errors are reported but are not failed components.
    assert_eq!(code, 0);
    assert!(out.contains("src/A.tsx - babel-plugin-react-compiler is not available"));
    assert_file_starts_with(&comment, "<!-- react-compiler-healthcheck -->\n## ✅");
    assert_file_starts_with(&markdown, "## ✅ React Compiler Healthcheck");
}

#[test]
fn test_invalid_config_exit_code() {
    let d = project(&["src/A.tsx"]);
    fs::write(d.path().join("healthcheck.toml"), "include = 5\n").unwrap();
    let (code, _) = run(bin().arg("check").arg("--cwd").arg(d.path()));
    assert_eq!(code, 2);
}

fn assert_file_starts_with(path: &Path, prefix: &str) {
    let content = fs::read_to_string(path).unwrap();
    assert!(content.starts_with(prefix), "{content}");
}
