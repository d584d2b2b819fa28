use super::types::{Config, HealthcheckToml};
use crate::error::{HealthcheckError, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub const CONFIG_FILE: &str = "healthcheck.toml";

/// Applies `healthcheck.toml` from the working directory, if present.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_toml_config(config: &mut Config) -> Result<()> {
    let path = config.cwd.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(());
    }
    let content = fs::read_to_string(&path).map_err(|e| HealthcheckError::io(e, &path))?;
    debug!("Loading {}", path.display());
    parse_toml(config, &content)
}

/// # Errors
/// Returns error if `content` is not a valid config document.
pub fn parse_toml(config: &mut Config, content: &str) -> Result<()> {
    let file: HealthcheckToml = toml::from_str(content)?;
    apply_toml(config, file);
    Ok(())
}

fn apply_toml(config: &mut Config, file: HealthcheckToml) {
    if let Some(include) = file.include {
        config.include = include;
    }
    if let Some(exclude) = file.exclude {
        config.exclude = exclude;
    }
    if let Some(path) = file.plugin_path {
        config.plugin_path = Some(path);
    }
    if let Some(v) = file.fail_on_error {
        config.policy.fail_on_error = v;
    }
    if let Some(v) = file.fail_threshold {
        config.policy.fail_threshold = v;
    }
    if let Some(v) = file.annotations {
        config.annotations = v;
    }
    if let Some(v) = file.comment_on_pr {
        config.comment_on_pr = v;
    }
    if let Some(v) = file.show_successes {
        config.show_successes = v;
    }
}

/// Reads one CI action input (`INPUT_<NAME>`), treating blanks as unset.
pub fn action_input<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    lookup(&key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Working directory requested through the action inputs.
pub fn action_working_directory<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    action_input(lookup, "working-directory").map(PathBuf::from)
}

/// Overlays CI action inputs read through `lookup`.
pub fn apply_action_inputs<F>(config: &mut Config, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = action_input(lookup, "include") {
        config.include = split_list(&raw);
    }
    if let Some(raw) = action_input(lookup, "exclude") {
        config.exclude = split_list(&raw);
    }
    if let Some(raw) = action_input(lookup, "plugin-path") {
        config.plugin_path = Some(PathBuf::from(raw));
    }
    if let Some(raw) = action_input(lookup, "fail-on-error") {
        config.policy.fail_on_error = parse_flag(&raw);
    }
    if let Some(raw) = action_input(lookup, "fail-threshold") {
        config.policy.fail_threshold = raw.parse().unwrap_or(0.0);
    }
    if let Some(raw) = action_input(lookup, "annotations") {
        config.annotations = parse_flag(&raw);
    }
    if let Some(raw) = action_input(lookup, "comment-on-pr") {
        config.comment_on_pr = parse_flag(&raw);
    }
    if let Some(raw) = action_input(lookup, "show-successes") {
        config.show_successes = parse_flag(&raw);
    }
    let token = action_input(lookup, "github-token")
        .or_else(|| lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()));
    if token.is_some() {
        config.github_token = token;
    }
}

/// Comma-separated list, trimmed, blanks dropped.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Action booleans are on unless spelled exactly `false`.
fn parse_flag(raw: &str) -> bool {
    raw != "false"
}
