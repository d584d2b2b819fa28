// src/healthcheck.rs
//! End-to-end run: scan, compile each file in order, aggregate.

use crate::compiler::{check_files, Compiler};
use crate::config::Config;
use crate::discovery;
use crate::error::Result;
use crate::types::HealthcheckResult;
use tracing::info;

/// Runs a health check with `compiler` over the files `config` selects.
///
/// # Errors
/// Returns error only for configuration problems (bad patterns, missing
/// working directory). Per-file failures are part of the result.
pub fn run(config: &Config, compiler: &dyn Compiler) -> Result<HealthcheckResult> {
    info!("Scanning for React files...");
    let files = discovery::scan(&config.include, &config.exclude, &config.cwd)?;
    info!("Found {} files to check", files.len());

    if files.is_empty() {
        return Ok(HealthcheckResult::default());
    }

    info!("Checking files for React Compiler optimization...");
    let results = check_files(&files, &config.cwd, compiler);
    Ok(HealthcheckResult::from_results(results))
}
