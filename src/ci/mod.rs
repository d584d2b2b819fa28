// src/ci/mod.rs
//! CI platform glue: step outputs, workflow-command annotations and the
//! single upserted pull-request comment.

pub mod comment;
pub mod github;
pub mod outputs;
pub mod workflow;

pub use comment::{
    decide, publish, upsert, with_marker, CommentAction, CommentSink, ExistingComment, MARKER,
};
pub use github::GitHubComments;
pub use outputs::StepOutputs;
pub use workflow::WorkflowCommandSink;

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// What the CI environment tells us about the current job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiContext {
    pub is_ci: bool,
    pub output_file: Option<PathBuf>,
    pub step_summary: Option<PathBuf>,
    /// `owner/repo`.
    pub repository: Option<String>,
    pub repo_url: Option<String>,
    pub api_url: Option<String>,
    pub commit_sha: Option<String>,
    /// Number of the pull request that triggered the run.
    pub pull_request: Option<u64>,
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestRef>,
}

#[derive(Deserialize)]
struct PullRequestRef {
    number: u64,
}

impl CiContext {
    /// Reads the GitHub Actions environment through `lookup`.
    ///
    /// The pull request comes from the event payload (`GITHUB_EVENT_PATH`),
    /// falling back to a `refs/pull/<n>/...` ref.
    pub fn detect<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let repository = get("GITHUB_REPOSITORY");
        let repo_url = repository.as_ref().map(|repo| {
            let server = get("GITHUB_SERVER_URL").unwrap_or_else(|| "https://github.com".into());
            format!("{}/{repo}", server.trim_end_matches('/'))
        });
        let pull_request = get("GITHUB_EVENT_PATH")
            .and_then(|path| payload_pull_request(&PathBuf::from(path)))
            .or_else(|| get("GITHUB_REF").as_deref().and_then(ref_pull_request));

        Self {
            is_ci: get("GITHUB_ACTIONS").as_deref() == Some("true"),
            output_file: get("GITHUB_OUTPUT").map(PathBuf::from),
            step_summary: get("GITHUB_STEP_SUMMARY").map(PathBuf::from),
            repository,
            repo_url,
            api_url: get("GITHUB_API_URL"),
            commit_sha: get("GITHUB_SHA"),
            pull_request,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::detect(&|key: &str| std::env::var(key).ok())
    }
}

fn payload_pull_request(path: &std::path::Path) -> Option<u64> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Cannot read event payload {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str::<EventPayload>(&raw) {
        Ok(payload) => payload.pull_request.map(|pr| pr.number),
        Err(e) => {
            debug!("Unreadable event payload {}: {e}", path.display());
            None
        }
    }
}

/// `refs/pull/42/merge` -> 42.
fn ref_pull_request(git_ref: &str) -> Option<u64> {
    git_ref
        .strip_prefix("refs/pull/")?
        .split('/')
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_github_env() {
        let ctx = CiContext::detect(&|key: &str| {
            let value = match key {
                "GITHUB_ACTIONS" => Some("true"),
                "GITHUB_SERVER_URL" => Some("https://github.example.com/"),
                "GITHUB_REPOSITORY" => Some("acme/web"),
                "GITHUB_SHA" => Some("deadbeef"),
                "GITHUB_REF" => Some("refs/pull/42/merge"),
                _ => None,
            };
            value.map(str::to_string)
        });
        assert!(ctx.is_ci);
        assert_eq!(ctx.pull_request, Some(42));
        assert_eq!(ctx.repository.as_deref(), Some("acme/web"));
        assert_eq!(ctx.repo_url.as_deref(), Some("https://github.example.com/acme/web"));
        assert_eq!(ctx.commit_sha.as_deref(), Some("deadbeef"));
        assert_eq!(ctx.output_file, None);
    }

    #[test]
    fn test_pull_request_from_event_payload() {
        let d = tempfile::tempdir().unwrap();
        let event = d.path().join("event.json");
        fs::write(&event, r#"{"action": "synchronize", "pull_request": {"number": 7, "draft": false}}"#)
            .unwrap();
        let event = event.to_string_lossy().into_owned();
        let ctx = CiContext::detect(&|key: &str| match key {
            "GITHUB_EVENT_PATH" => Some(event.clone()),
            "GITHUB_REF" => Some("refs/pull/99/merge".to_string()),
            "GITHUB_REPOSITORY" => Some("acme/web".to_string()),
            _ => None,
        });
        assert_eq!(ctx.pull_request, Some(7));
        assert_eq!(ctx.repo_url.as_deref(), Some("https://github.com/acme/web"));
    }

    #[test]
    fn test_push_event_is_not_a_pull_request() {
        let d = tempfile::tempdir().unwrap();
        let event = d.path().join("event.json");
        fs::write(&event, r#"{"ref": "refs/heads/main"}"#).unwrap();
        let event = event.to_string_lossy().into_owned();
        let ctx = CiContext::detect(&|key: &str| match key {
            "GITHUB_EVENT_PATH" => Some(event.clone()),
            "GITHUB_REF" => Some("refs/heads/main".to_string()),
            _ => None,
        });
        assert_eq!(ctx.pull_request, None);
    }

    #[test]
    fn test_ref_pull_request() {
        assert_eq!(ref_pull_request("refs/pull/123/merge"), Some(123));
        assert_eq!(ref_pull_request("refs/heads/pull/1"), None);
        assert_eq!(ref_pull_request("refs/pull/abc/merge"), None);
    }

    #[test]
    fn test_detect_outside_ci() {
        let ctx = CiContext::detect(&|_: &str| None);
        assert_eq!(ctx, CiContext::default());
    }
}
