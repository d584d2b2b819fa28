// src/cli/handlers/mod.rs
//! Command handlers.

use super::args::{CheckArgs, LinkArgs, ScanArgs};
use super::dispatch::Presentation;
use crate::ci::{
    publish, with_marker, CiContext, CommentAction, GitHubComments, StepOutputs,
    WorkflowCommandSink,
};
use crate::compiler::NodeCompiler;
use crate::config::Config;
use crate::discovery;
use crate::exit::HealthcheckExit;
use crate::gate::failure_message;
use crate::healthcheck;
use crate::reporting::{self, ConsoleOptions, MarkdownOptions};
use crate::types::HealthcheckResult;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

mod report;
pub use report::handle_report;

/// Handles `check`: the full CI flow.
///
/// # Errors
/// Returns error if a report or output file cannot be written.
pub fn handle_check(args: &CheckArgs, presentation: Presentation) -> Result<HealthcheckExit> {
    let ci = CiContext::from_env();
    let mut config = match Config::from_env(args.scan.cwd.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(HealthcheckExit::InvalidInput);
        }
    };
    args.apply(&mut config);

    info!("Working directory: {}", config.cwd.display());
    info!("Include patterns: {}", config.include.join(", "));
    info!("Exclude patterns: {}", config.exclude.join(", "));

    let compiler = NodeCompiler::new(config.plugin_path.clone());
    let result = match healthcheck::run(&config, &compiler) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(HealthcheckExit::InvalidInput);
        }
    };

    let summary = result.summary;
    let should_fail = config.policy.should_fail(&summary);

    let outputs = StepOutputs::new(&summary, should_fail);
    if let Some(path) = &ci.output_file {
        outputs
            .append_to(path)
            .with_context(|| format!("Failed to write step outputs to {}", path.display()))?;
    }

    reporting::print_console(&result, ConsoleOptions { color: presentation.color });

    if config.annotations && (ci.is_ci || args.annotations == Some(true)) {
        let annotations = reporting::create_annotations(&result);
        let stdout = std::io::stdout();
        let mut sink = WorkflowCommandSink::new(stdout.lock());
        reporting::emit(&annotations, &mut sink).context("Failed to emit annotations")?;
    }

    write_artifacts(args, &config, &ci, &result)?;

    if should_fail {
        eprintln!("{}", failure_message(&summary).red().bold());
        return Ok(HealthcheckExit::CheckFailed);
    }
    Ok(HealthcheckExit::Success)
}

fn write_artifacts(
    args: &CheckArgs,
    config: &Config,
    ci: &CiContext,
    result: &HealthcheckResult,
) -> Result<()> {
    let options = markdown_options(&args.links, ci, config.show_successes);
    let markdown = reporting::render_markdown(result, &options);

    if let Some(path) = &args.markdown_out {
        write_file(path, &markdown)?;
    }
    if let Some(path) = &ci.step_summary {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        writeln!(file, "{markdown}")?;
    }
    if let Some(path) = &args.comment_out {
        if config.comment_on_pr {
            write_file(path, &with_marker(&markdown))?;
        } else {
            debug!("comment-on-pr disabled; skipping {}", path.display());
        }
    }
    if let Some(path) = &args.json_out {
        let json = serde_json::to_string_pretty(result)?;
        write_file(path, &json)?;
    }

    let sink = GitHubComments::for_run(ci, config.github_token.as_deref());
    match publish(config.comment_on_pr, sink, &markdown).context("Failed to post PR comment")? {
        Some(CommentAction::Update(id)) => info!("Updated existing PR comment #{id}"),
        Some(CommentAction::Create) => info!("Created new PR comment"),
        None => debug!("Skipping PR comment"),
    }
    Ok(())
}

/// Link settings from flags, falling back to the CI environment.
pub(crate) fn markdown_options(
    links: &LinkArgs,
    ci: &CiContext,
    show_successes: bool,
) -> MarkdownOptions {
    MarkdownOptions {
        repo_url: links.repo_url.clone().or_else(|| ci.repo_url.clone()),
        commit_sha: links.commit_sha.clone().or_else(|| ci.commit_sha.clone()),
        show_successes: show_successes || links.show_successes,
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Handles `scan`: prints one matching path per line.
///
/// # Errors
/// Returns error if the working directory cannot be walked.
pub fn handle_scan(args: &ScanArgs) -> Result<HealthcheckExit> {
    let mut config = match Config::from_env(args.cwd.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(HealthcheckExit::InvalidInput);
        }
    };
    args.apply(&mut config);

    let files = match discovery::scan(&config.include, &config.exclude, &config.cwd) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(HealthcheckExit::InvalidInput);
        }
    };
    for file in &files {
        println!("{file}");
    }
    info!("Found {} files to check", files.len());
    Ok(HealthcheckExit::Success)
}
