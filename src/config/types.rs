use crate::discovery::{DEFAULT_EXCLUDE_PATTERNS, DEFAULT_INCLUDE_PATTERNS};
use crate::gate::FailPolicy;
use serde::Deserialize;
use std::path::PathBuf;

/// Contents of `healthcheck.toml`. Every key is optional and only overrides
/// what is set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthcheckToml {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub plugin_path: Option<PathBuf>,
    pub fail_on_error: Option<bool>,
    pub fail_threshold: Option<f64>,
    pub annotations: Option<bool>,
    pub comment_on_pr: Option<bool>,
    pub show_successes: Option<bool>,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct Config {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub cwd: PathBuf,
    pub plugin_path: Option<PathBuf>,
    pub policy: FailPolicy,
    pub annotations: bool,
    pub comment_on_pr: bool,
    pub show_successes: bool,
    /// Token for the pull-request comment. Only read from the environment.
    pub github_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include: to_owned(DEFAULT_INCLUDE_PATTERNS),
            exclude: to_owned(DEFAULT_EXCLUDE_PATTERNS),
            cwd: PathBuf::from("."),
            plugin_path: None,
            policy: FailPolicy::default(),
            annotations: true,
            comment_on_pr: true,
            show_successes: false,
            github_token: None,
        }
    }
}

fn to_owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| (*p).to_string()).collect()
}
