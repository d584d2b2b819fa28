// src/summary.rs
//! Reduces per-file outcomes into a [`HealthcheckSummary`].

use crate::dedup::unique_failure_count;
use crate::types::{FileCheckResult, HealthcheckSummary};

/// Aggregates `results` into run-wide counts.
///
/// Files with a top-level error count toward `files_with_errors` and nothing
/// else. Failures are counted once per distinct [`FailureKey`], so a function
/// reported several times for the same reason is one failed component.
///
/// [`FailureKey`]: crate::dedup::FailureKey
#[must_use]
pub fn aggregate(results: &[FileCheckResult]) -> HealthcheckSummary {
    let mut summary = HealthcheckSummary {
        total_files: results.len(),
        ..HealthcheckSummary::default()
    };

    for result in results {
        if result.error.is_some() {
            summary.files_with_errors += 1;
            continue;
        }

        let passed = result.compilation_result.successes.len();
        let failed = unique_failure_count(result);

        summary.total_components += passed + failed;
        summary.passed_components += passed;
        summary.failed_components += failed;

        if failed > 0 {
            summary.files_with_errors += 1;
        } else if passed > 0 {
            summary.files_fully_optimized += 1;
        }
    }

    summary
}
