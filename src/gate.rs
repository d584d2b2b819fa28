// src/gate.rs
//! Pass/fail decision consumed by CI.

use crate::types::HealthcheckSummary;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FailPolicy {
    /// Fail on any failed component.
    pub fail_on_error: bool,
    /// With `fail_on_error` off: fail when the failure rate (percent) exceeds
    /// this value. `0` disables the check.
    pub fail_threshold: f64,
}

impl Default for FailPolicy {
    fn default() -> Self {
        Self {
            fail_on_error: true,
            fail_threshold: 0.0,
        }
    }
}

impl FailPolicy {
    /// Decides whether the run should fail.
    ///
    /// An empty run (no components found) has a pass rate of 100 here and
    /// never trips the threshold.
    #[must_use]
    pub fn should_fail(&self, summary: &HealthcheckSummary) -> bool {
        if self.fail_on_error {
            return summary.failed_components > 0;
        }
        if self.fail_threshold > 0.0 {
            let fail_rate = 100.0 - summary.gate_pass_rate();
            return fail_rate > self.fail_threshold;
        }
        false
    }
}

/// The message attached to the non-zero exit.
#[must_use]
pub fn failure_message(summary: &HealthcheckSummary) -> String {
    format!(
        "React Compiler healthcheck failed: {} component(s) not optimized",
        summary.failed_components
    )
}
