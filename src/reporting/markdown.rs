//! Markdown report for pull-request comments and job summaries.
//!
//! Unlike the console report this lists every raw failure event, so a
//! reviewer sees each occurrence the compiler reported.

use super::shared::{display_rate, ALL_OPTIMIZED, TITLE};
use crate::dedup::raw_failures;
use crate::types::{DiagnosticEvent, HealthcheckResult};

const SUCCESS_GLYPH: &str = "✅";
const FAILURE_GLYPH: &str = "❌";

#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Base URL of the repository, e.g. `https://github.com/owner/repo`.
    pub repo_url: Option<String>,
    pub commit_sha: Option<String>,
    /// Append a collapsible list of every optimized component.
    pub show_successes: bool,
}

impl MarkdownOptions {
    fn link_base(&self) -> Option<(&str, &str)> {
        match (self.repo_url.as_deref(), self.commit_sha.as_deref()) {
            (Some(url), Some(sha)) if !url.is_empty() && !sha.is_empty() => {
                Some((url.trim_end_matches('/'), sha))
            }
            _ => None,
        }
    }
}

/// Renders the Markdown report.
#[must_use]
pub fn render_markdown(result: &HealthcheckResult, options: &MarkdownOptions) -> String {
    let summary = &result.summary;
    let mut lines: Vec<String> = Vec::new();

    let glyph = if summary.failed_components == 0 {
        SUCCESS_GLYPH
    } else {
        FAILURE_GLYPH
    };
    lines.push(format!("## {glyph} {TITLE}"));
    lines.push(String::new());
    lines.push("| Metric | Value |".into());
    lines.push("|--------|-------|".into());
    lines.push(format!("| Files scanned | {} |", summary.total_files));
    lines.push(format!("| Total components | {} |", summary.total_components));
    lines.push(format!("| Passed | {} |", summary.passed_components));
    lines.push(format!("| Failed | {} |", summary.failed_components));
    lines.push(format!("| Pass rate | {}% |", display_rate(summary)));
    lines.push(String::new());

    write_failures(&mut lines, result, options);

    if options.show_successes && summary.passed_components > 0 {
        write_successes(&mut lines, result, options);
    }

    if summary.is_fully_optimized() {
        lines.push(format!("🎉 **{ALL_OPTIMIZED}**"));
    }

    lines.push(String::new());
    lines.push("---".into());
    lines.push(format!("*Generated by {TITLE}*"));
    lines.join("\n")
}

fn write_failures(lines: &mut Vec<String>, result: &HealthcheckResult, options: &MarkdownOptions) {
    let failed: Vec<_> = result
        .results
        .iter()
        .filter(|r| !r.compilation_result.failures.is_empty() || r.error.is_some())
        .collect();
    if failed.is_empty() {
        return;
    }

    lines.push("<details>".into());
    lines.push(format!(
        "<summary>{FAILURE_GLYPH} Failed Components ({})</summary>",
        result.summary.failed_components
    ));
    lines.push(String::new());

    for file in failed {
        if let Some(error) = file.error.as_deref() {
            lines.push(format!("#### `{}`", file.file_path));
            lines.push(format!("> ⚠️ {error}"));
            lines.push(String::new());
            continue;
        }

        for (path, event) in raw_failures(std::iter::once(file)) {
            lines.push(format!("#### {} - `{}`", location(path, event, options), event.name()));
            lines.push(format!("> {}", event.reason()));
            let suggestions = event.suggestions();
            if !suggestions.is_empty() {
                lines.push(String::new());
                lines.push("**Suggestions:**".into());
                for suggestion in suggestions {
                    lines.push(format!("- {suggestion}"));
                }
            }
            lines.push(String::new());
        }
    }

    lines.push("</details>".into());
    lines.push(String::new());
}

fn write_successes(lines: &mut Vec<String>, result: &HealthcheckResult, options: &MarkdownOptions) {
    lines.push("<details>".into());
    lines.push(format!(
        "<summary>{SUCCESS_GLYPH} Optimized Components ({})</summary>",
        result.summary.passed_components
    ));
    lines.push(String::new());

    for file in &result.results {
        for event in &file.compilation_result.successes {
            lines.push(format!(
                "- {} - `{}`",
                location(&file.file_path, event, options),
                event.name()
            ));
        }
    }

    lines.push(String::new());
    lines.push("</details>".into());
    lines.push(String::new());
}

/// `path:line` as a code span, linked to the blob when repository info is known.
fn location(path: &str, event: &DiagnosticEvent, options: &MarkdownOptions) -> String {
    let line = event.start_line().unwrap_or(0);
    match options.link_base() {
        Some((url, sha)) => format!("[`{path}:{line}`]({url}/blob/{sha}/{path}#L{line})"),
        None => format!("`{path}:{line}`"),
    }
}
