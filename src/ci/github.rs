//! GitHub REST transport for the pull-request comment.

use super::comment::{CommentSink, ExistingComment};
use super::CiContext;
use crate::error::{HealthcheckError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("react-compiler-healthcheck/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct IssueComment {
    id: u64,
    body: Option<String>,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

/// Issue comments of one pull request, authenticated with a token.
pub struct GitHubComments {
    agent: ureq::Agent,
    api_url: String,
    repository: String,
    pull_request: u64,
    token: String,
}

impl GitHubComments {
    #[must_use]
    pub fn new(api_url: &str, repository: &str, pull_request: u64, token: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build(),
            api_url: api_url.trim_end_matches('/').to_string(),
            repository: repository.to_string(),
            pull_request,
            token: token.to_string(),
        }
    }

    /// The client for this run, or `None` when the run is not for a pull
    /// request or no token was given.
    #[must_use]
    pub fn for_run(ci: &CiContext, token: Option<&str>) -> Option<Self> {
        let token = token.filter(|t| !t.is_empty())?;
        let pull_request = ci.pull_request?;
        let repository = ci.repository.as_deref()?;
        let api_url = ci.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        Some(Self::new(api_url, repository, pull_request, token))
    }

    #[must_use]
    pub fn comments_url(&self) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_url, self.repository, self.pull_request
        )
    }

    #[must_use]
    pub fn comment_url(&self, id: u64) -> String {
        format!("{}/repos/{}/issues/comments/{id}", self.api_url, self.repository)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Accept", "application/vnd.github+json")
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("X-GitHub-Api-Version", "2022-11-28")
    }

    fn send(&self, method: &str, url: &str, body: &str) -> Result<()> {
        let payload = serde_json::to_string(&CommentBody { body })?;
        self.request(method, url)
            .set("Content-Type", "application/json")
            .send_string(&payload)
            .map_err(|e| HealthcheckError::GitHub(format!("{method} {url}: {e}")))?;
        Ok(())
    }
}

impl CommentSink for GitHubComments {
    type Error = HealthcheckError;

    fn list(&mut self) -> Result<Vec<ExistingComment>> {
        let url = self.comments_url();
        let mut comments = Vec::new();
        for page in 1.. {
            let response = self
                .request("GET", &url)
                .query("per_page", &PER_PAGE.to_string())
                .query("page", &page.to_string())
                .call()
                .map_err(|e| HealthcheckError::GitHub(format!("GET {url}: {e}")))?;
            let raw = response
                .into_string()
                .map_err(|e| HealthcheckError::GitHub(format!("GET {url}: {e}")))?;
            let batch: Vec<IssueComment> = serde_json::from_str(&raw)?;
            let done = batch.len() < PER_PAGE;
            comments.extend(batch.into_iter().map(|c| ExistingComment {
                id: c.id,
                body: c.body,
            }));
            if done {
                break;
            }
        }
        debug!("Found {} comments on #{}", comments.len(), self.pull_request);
        Ok(comments)
    }

    fn create(&mut self, body: &str) -> Result<()> {
        let url = self.comments_url();
        self.send("POST", &url, body)
    }

    fn update(&mut self, id: u64, body: &str) -> Result<()> {
        let url = self.comment_url(id);
        self.send("PATCH", &url, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr_context() -> CiContext {
        CiContext {
            repository: Some("acme/web".into()),
            pull_request: Some(12),
            ..CiContext::default()
        }
    }

    #[test]
    fn test_for_run_requires_token_and_pull_request() {
        assert!(GitHubComments::for_run(&pr_context(), Some("t")).is_some());
        assert!(GitHubComments::for_run(&pr_context(), None).is_none());
        assert!(GitHubComments::for_run(&pr_context(), Some("")).is_none());

        let push = CiContext { pull_request: None, ..pr_context() };
        assert!(GitHubComments::for_run(&push, Some("t")).is_none());

        let no_repo = CiContext { repository: None, ..pr_context() };
        assert!(GitHubComments::for_run(&no_repo, Some("t")).is_none());
    }

    #[test]
    fn test_urls() {
        let client = GitHubComments::for_run(&pr_context(), Some("t")).unwrap();
        assert_eq!(
            client.comments_url(),
            "https://api.github.com/repos/acme/web/issues/12/comments"
        );
        assert_eq!(
            client.comment_url(5),
            "https://api.github.com/repos/acme/web/issues/comments/5"
        );

        let enterprise = CiContext {
            api_url: Some("https://ghe.example.com/api/v3/".into()),
            ..pr_context()
        };
        let client = GitHubComments::for_run(&enterprise, Some("t")).unwrap();
        assert_eq!(
            client.comments_url(),
            "https://ghe.example.com/api/v3/repos/acme/web/issues/12/comments"
        );
    }
}
