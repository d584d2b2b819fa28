//! Terminal report for a health-check run.
//!
//! Failures are deduplicated by `path|line|name|reason`. The first occurrence
//! supplies the displayed line, reason and suggestions; later repeats only
//! bump the `(×N)` counter. Files that failed outright are listed inline, in
//! file order, as a single line.

use super::shared::{bold, display_rate, paint, ALL_OPTIMIZED, TITLE};
use crate::dedup::{unique_failures, GroupedFailure};
use crate::types::HealthcheckResult;
use colored::Color;

const RULE_WIDTH: usize = 50;

/// Rendering switches for the console report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOptions {
    /// Emit ANSI styling. Disable for files, pipes and CI logs that do not render it.
    pub color: bool,
}

enum Row<'a> {
    FileError { path: &'a str, error: &'a str },
    Failure(GroupedFailure<'a>),
}

/// Renders the console report as a string.
#[must_use]
pub fn render_console(result: &HealthcheckResult, options: ConsoleOptions) -> String {
    let color = options.color;
    let summary = &result.summary;
    let mut lines: Vec<String> = Vec::new();

    lines.push(String::new());
    lines.push(bold(&format!("{TITLE} Results"), color));
    lines.push("═".repeat(RULE_WIDTH));
    lines.push(String::new());

    lines.push(format!("{} {}", paint("Files scanned:", Color::Blue, color), summary.total_files));
    lines.push(format!(
        "{} {}",
        paint("Total components:", Color::Blue, color),
        summary.total_components
    ));
    lines.push(format!("{} {}", paint("Passed:", Color::Green, color), summary.passed_components));
    lines.push(format!("{} {}", paint("Failed:", Color::Red, color), summary.failed_components));
    lines.push(format!("{} {}%", paint("Pass rate:", Color::Blue, color), display_rate(summary)));
    lines.push(String::new());

    if result.results.iter().any(|r| r.needs_attention()) {
        lines.push(paint("Failed Components:", Color::Red, color));
        lines.push("─".repeat(RULE_WIDTH));
        for row in collect_rows(result) {
            push_row(&mut lines, &row, color);
        }
        lines.push(String::new());
    }

    if summary.is_fully_optimized() {
        lines.push(paint(&format!("✓ {ALL_OPTIMIZED}"), Color::Green, color));
    } else if summary.failed_components > 0 {
        lines.push(paint(
            &format!("✗ {} component(s) failed optimization", summary.failed_components),
            Color::Red,
            color,
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Prints the console report to stdout.
pub fn print_console(result: &HealthcheckResult, options: ConsoleOptions) {
    println!("{}", render_console(result, options));
}

/// Failure groups per file, with errored files inline. Keys carry the path,
/// so grouping file by file matches grouping the whole run.
fn collect_rows(result: &HealthcheckResult) -> Vec<Row<'_>> {
    let mut rows: Vec<Row<'_>> = Vec::new();
    for file in result.results.iter().filter(|r| r.needs_attention()) {
        match file.error.as_deref() {
            Some(error) => rows.push(Row::FileError { path: &file.file_path, error }),
            None => {
                let groups = unique_failures(std::iter::once(file));
                rows.extend(groups.into_iter().map(Row::Failure));
            }
        }
    }
    rows
}

fn push_row(lines: &mut Vec<String>, row: &Row<'_>, color: bool) {
    let cross = paint("✗", Color::Red, color);
    match row {
        Row::FileError { path, error } => {
            lines.push(format!("  {cross} {path} - {}", paint(error, Color::BrightBlack, color)));
        }
        Row::Failure(grouped) => {
            let event = grouped.event;
            let line = event
                .start_line()
                .map_or_else(|| "?".to_string(), |l| l.to_string());
            let suffix = if grouped.count > 1 {
                format!(" {}", paint(&format!("(×{})", grouped.count), Color::BrightBlack, color))
            } else {
                String::new()
            };
            lines.push(format!(
                "  {cross} {}:{line} - {}{suffix}",
                grouped.file_path,
                paint(event.name(), Color::Yellow, color)
            ));
            lines.push(format!("    {}", paint(event.reason(), Color::BrightBlack, color)));
            for suggestion in event.suggestions() {
                lines.push(format!("    {} {suggestion}", paint("→", Color::Blue, color)));
            }
        }
    }
}
