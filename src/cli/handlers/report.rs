//! `report`: re-render a saved result.

use super::markdown_options;
use crate::ci::{CiContext, WorkflowCommandSink};
use crate::cli::args::{ReportArgs, ReportFormat};
use crate::cli::dispatch::Presentation;
use crate::exit::HealthcheckExit;
use crate::reporting::{self, ConsoleOptions};
use crate::types::HealthcheckResult;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

/// Loads a saved result and recomputes its summary from the file list.
///
/// # Errors
/// Returns error if the file cannot be read or is not a result document.
pub fn load_result(path: &std::path::Path) -> Result<HealthcheckResult> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let saved: HealthcheckResult = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a healthcheck result", path.display()))?;
    Ok(HealthcheckResult::from_results(saved.results))
}

/// # Errors
/// Returns error if writing annotations or JSON to stdout fails.
pub fn handle_report(args: &ReportArgs, presentation: Presentation) -> Result<HealthcheckExit> {
    let result = match load_result(&args.input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red());
            return Ok(HealthcheckExit::InvalidInput);
        }
    };

    match args.format {
        ReportFormat::Console => {
            reporting::print_console(&result, ConsoleOptions { color: presentation.color });
        }
        ReportFormat::Markdown => {
            let ci = CiContext::from_env();
            let options = markdown_options(&args.links, &ci, false);
            println!("{}", reporting::render_markdown(&result, &options));
        }
        ReportFormat::Annotations => {
            let annotations = reporting::create_annotations(&result);
            let stdout = std::io::stdout();
            let mut sink = WorkflowCommandSink::new(stdout.lock());
            reporting::emit(&annotations, &mut sink)?;
        }
        ReportFormat::Json => reporting::print_json(&result)?,
    }
    Ok(HealthcheckExit::Success)
}
