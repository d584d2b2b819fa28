//! One pull-request comment per PR, found again through a marker.
//!
//! [`decide`] is the whole upsert policy and has no I/O. [`upsert`] drives a
//! [`CommentSink`]; [`super::GitHubComments`] is the REST-backed one.

/// Sentinel placed on the first line of every comment body we post.
pub const MARKER: &str = "<!-- react-compiler-healthcheck -->";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingComment {
    pub id: u64,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Update(u64),
    Create,
}

/// Picks the first comment whose body carries `marker`.
#[must_use]
pub fn decide(existing: &[ExistingComment], marker: &str) -> CommentAction {
    existing
        .iter()
        .find(|c| c.body.as_deref().is_some_and(|b| b.contains(marker)))
        .map_or(CommentAction::Create, |c| CommentAction::Update(c.id))
}

/// Prefixes `body` with the marker line.
#[must_use]
pub fn with_marker(body: &str) -> String {
    format!("{MARKER}\n{body}")
}

/// Comment operations on one pull request.
pub trait CommentSink {
    type Error;

    /// # Errors
    /// Returns the client's error.
    fn list(&mut self) -> Result<Vec<ExistingComment>, Self::Error>;
    /// # Errors
    /// Returns the client's error.
    fn create(&mut self, body: &str) -> Result<(), Self::Error>;
    /// # Errors
    /// Returns the client's error.
    fn update(&mut self, id: u64, body: &str) -> Result<(), Self::Error>;
}

impl<S: CommentSink + ?Sized> CommentSink for &mut S {
    type Error = S::Error;

    fn list(&mut self) -> Result<Vec<ExistingComment>, Self::Error> {
        (**self).list()
    }

    fn create(&mut self, body: &str) -> Result<(), Self::Error> {
        (**self).create(body)
    }

    fn update(&mut self, id: u64, body: &str) -> Result<(), Self::Error> {
        (**self).update(id, body)
    }
}

/// Posts `body` (marker added here) or updates the previous comment.
///
/// # Errors
/// Propagates sink errors unchanged; nothing is retried.
pub fn upsert<S: CommentSink>(sink: &mut S, body: &str) -> Result<CommentAction, S::Error> {
    let full = with_marker(body);
    let action = decide(&sink.list()?, MARKER);
    match action {
        CommentAction::Update(id) => sink.update(id, &full)?,
        CommentAction::Create => sink.create(&full)?,
    }
    Ok(action)
}

/// Upserts `body` through `sink` when commenting is enabled and the run has
/// a sink (a pull request with a token). Returns `None` when skipped.
///
/// # Errors
/// Propagates sink errors unchanged.
pub fn publish<S: CommentSink>(
    enabled: bool,
    sink: Option<S>,
    body: &str,
) -> Result<Option<CommentAction>, S::Error> {
    match sink {
        Some(mut sink) if enabled => upsert(&mut sink, body).map(Some),
        _ => Ok(None),
    }
}
