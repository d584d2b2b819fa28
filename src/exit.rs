// src/exit.rs
//! Standardized process exit codes.
//!
//! Provides a stable contract for CI scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum HealthcheckExit {
    /// Run completed and the gate passed.
    Success = 0,
    /// Generic error (e.g. IO, unreadable result file).
    Error = 1,
    /// Invalid configuration or input (bad glob, malformed healthcheck.toml).
    InvalidInput = 2,
    /// The pass/fail gate tripped.
    CheckFailed = 3,
}

impl HealthcheckExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for HealthcheckExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_distinct() {
        let codes = [
            HealthcheckExit::Success,
            HealthcheckExit::Error,
            HealthcheckExit::InvalidInput,
            HealthcheckExit::CheckFailed,
        ]
        .map(HealthcheckExit::code);
        assert_eq!(codes, [0, 1, 2, 3]);
    }
}
