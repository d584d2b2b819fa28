// src/types.rs
//! Shared data shapes describing one health-check run.
//!
//! The field names on the wire follow the compiler plugin's logger events
//! (`fnLoc`, `fnName`, `CompileSuccess`, ...) so events can cross the Node
//! bridge and saved results can be re-rendered without translation.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A single position inside a source file. Either coordinate may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl SourcePosition {
    #[must_use]
    pub fn line(line: u32) -> Self {
        Self { line: Some(line), column: None }
    }
}

/// Start/end span of a function as reported by the compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<SourcePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<SourcePosition>,
}

impl SourceLocation {
    #[must_use]
    pub fn lines(start: u32, end: u32) -> Self {
        Self {
            start: Some(SourcePosition::line(start)),
            end: Some(SourcePosition::line(end)),
        }
    }

    #[must_use]
    pub fn start_line(&self) -> Option<u32> {
        self.start.and_then(|p| p.line)
    }

    #[must_use]
    pub fn end_line(&self) -> Option<u32> {
        self.end.and_then(|p| p.line)
    }
}

/// What the compiler said about one function.
///
/// `Success` is the only passing kind. Anything the plugin emits that this
/// build does not recognise lands in `Unknown` and is treated as a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    #[serde(rename = "CompileSuccess")]
    Success,
    #[serde(rename = "CompileError")]
    Error,
    #[serde(rename = "CompileDiagnostic")]
    Diagnostic,
    PipelineError,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DiagnosticKind {
    #[must_use]
    pub fn is_success(self) -> bool {
        match self {
            Self::Success => true,
            Self::Error | Self::Diagnostic | Self::PipelineError | Self::Unknown => false,
        }
    }
}

/// Human-readable explanation attached to a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "suggestion_texts",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub suggestions: Vec<String>,
    /// Newer plugin releases nest the same fields under `options`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Box<EventDetail>>,
}

impl EventDetail {
    /// The first non-empty of `reason`, `description`, then the nested options.
    #[must_use]
    pub fn reason_text(&self) -> Option<&str> {
        let own = self
            .reason
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.description.as_deref().filter(|s| !s.is_empty()));
        own.or_else(|| self.options.as_deref().and_then(EventDetail::reason_text))
    }

    #[must_use]
    pub fn suggestion_list(&self) -> &[String] {
        if self.suggestions.is_empty() {
            if let Some(opts) = self.options.as_deref() {
                return opts.suggestion_list();
            }
        }
        &self.suggestions
    }
}

/// A proposed fix. Plugin builds send either a plain string or an edit
/// object such as `{description, op, range, text}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSuggestion {
    Text(String),
    Edit {
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
    Other(IgnoredAny),
}

impl RawSuggestion {
    fn into_text(self) -> Option<String> {
        let text = match self {
            Self::Text(text) => Some(text),
            Self::Edit { description, text } => {
                description.filter(|d| !d.is_empty()).or(text)
            }
            Self::Other(_) => None,
        };
        text.filter(|t| !t.is_empty())
    }
}

/// `null` or a missing list reads as empty; entries without text are dropped.
fn suggestion_texts<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawSuggestion>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .flatten()
        .filter_map(RawSuggestion::into_text)
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One compiler-reported fact about one function within one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: DiagnosticKind,
    #[serde(rename = "fnLoc", default, skip_serializing_if = "Option::is_none")]
    pub function_location: Option<SourceLocation>,
    #[serde(rename = "fnName", default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<EventDetail>,
}

pub const ANONYMOUS: &str = "anonymous";
pub const UNKNOWN_REASON: &str = "Unknown reason";

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticKind, name: Option<&str>, location: Option<SourceLocation>) -> Self {
        Self {
            filename: None,
            kind,
            function_location: location,
            function_name: name.map(str::to_string),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: &str, suggestions: &[&str]) -> Self {
        self.detail = Some(EventDetail {
            reason: Some(reason.to_string()),
            suggestions: suggestions.iter().map(|s| (*s).to_string()).collect(),
            ..EventDetail::default()
        });
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.function_name.as_deref().unwrap_or(ANONYMOUS)
    }

    #[must_use]
    pub fn start_line(&self) -> Option<u32> {
        self.function_location.and_then(|l| l.start_line())
    }

    #[must_use]
    pub fn end_line(&self) -> Option<u32> {
        self.function_location.and_then(|l| l.end_line())
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        self.detail
            .as_ref()
            .and_then(EventDetail::reason_text)
            .unwrap_or(UNKNOWN_REASON)
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match &self.detail {
            Some(detail) => detail.suggestion_list(),
            None => &[],
        }
    }
}

/// Per-file outcome of one compiler run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationResult {
    #[serde(rename = "successfulCompilations", default)]
    pub successes: Vec<DiagnosticEvent>,
    #[serde(rename = "failedCompilations", default)]
    pub failures: Vec<DiagnosticEvent>,
}

impl CompilationResult {
    /// Files an event under the list its kind belongs to.
    pub fn record(&mut self, event: DiagnosticEvent) {
        if event.kind.is_success() {
            self.successes.push(event);
        } else {
            self.failures.push(event);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.successes.is_empty() && self.failures.is_empty()
    }
}

impl FromIterator<DiagnosticEvent> for CompilationResult {
    fn from_iter<I: IntoIterator<Item = DiagnosticEvent>>(iter: I) -> Self {
        let mut result = Self::default();
        for event in iter {
            result.record(event);
        }
        result
    }
}

/// Outcome of checking one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCheckResult {
    pub file_path: String,
    pub success: bool,
    #[serde(default)]
    pub compilation_result: CompilationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileCheckResult {
    #[must_use]
    pub fn compiled(file_path: impl Into<String>, compilation_result: CompilationResult) -> Self {
        Self {
            file_path: file_path.into(),
            success: compilation_result.failures.is_empty(),
            compilation_result,
            error: None,
        }
    }

    #[must_use]
    pub fn errored(file_path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            success: false,
            compilation_result: CompilationResult::default(),
            error: Some(error.into()),
        }
    }

    /// True when the file errored outright or has at least one failed function.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        !self.success || self.error.is_some()
    }
}

/// Aggregate counts over every checked file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthcheckSummary {
    pub total_files: usize,
    pub total_components: usize,
    pub passed_components: usize,
    pub failed_components: usize,
    pub files_with_errors: usize,
    pub files_fully_optimized: usize,
}

impl HealthcheckSummary {
    /// Pass rate as displayed in reports: `0.0` when nothing was found.
    #[must_use]
    pub fn display_pass_rate(&self) -> f64 {
        self.rate_or(0.0)
    }

    /// Pass rate as used by the CI gate: `100.0` when nothing was found.
    #[must_use]
    pub fn gate_pass_rate(&self) -> f64 {
        self.rate_or(100.0)
    }

    #[must_use]
    pub fn is_fully_optimized(&self) -> bool {
        self.failed_components == 0 && self.total_components > 0
    }

    #[allow(clippy::cast_precision_loss)]
    fn rate_or(&self, empty: f64) -> f64 {
        if self.total_components == 0 {
            return empty;
        }
        self.passed_components as f64 / self.total_components as f64 * 100.0
    }
}

/// The single object threaded through every renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthcheckResult {
    pub summary: HealthcheckSummary,
    pub results: Vec<FileCheckResult>,
}

impl HealthcheckResult {
    /// Builds a result whose summary is derived from `results`.
    #[must_use]
    pub fn from_results(results: Vec<FileCheckResult>) -> Self {
        let summary = crate::summary::aggregate(&results);
        Self { summary, results }
    }
}
