//! Step outputs (`name=value`) for downstream workflow steps.

use crate::types::HealthcheckSummary;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutputs {
    pub total_files: usize,
    pub total_components: usize,
    pub passed: usize,
    pub failed: usize,
    /// One decimal; `100.0` when no components were found.
    pub pass_rate: String,
    pub success: bool,
}

impl StepOutputs {
    #[must_use]
    pub fn new(summary: &HealthcheckSummary, should_fail: bool) -> Self {
        Self {
            total_files: summary.total_files,
            total_components: summary.total_components,
            passed: summary.passed_components,
            failed: summary.failed_components,
            pass_rate: format!("{:.1}", summary.gate_pass_rate()),
            success: !should_fail,
        }
    }

    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("total-files", self.total_files.to_string()),
            ("total-components", self.total_components.to_string()),
            ("passed", self.passed.to_string()),
            ("failed", self.failed.to_string()),
            ("pass-rate", self.pass_rate.clone()),
            ("success", self.success.to_string()),
        ]
    }

    /// Appends the outputs to the file named by `GITHUB_OUTPUT`.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or written.
    pub fn append_to(&self, path: &Path) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        for (name, value) in self.pairs() {
            writeln!(file, "{name}={value}")?;
        }
        Ok(())
    }
}
