//! Line-anchored annotations for a CI annotation sink.
//!
//! One annotation per raw failure event plus one per file-level error, in
//! file order then event order.

use crate::types::HealthcheckResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Error,
    Warning,
    Notice,
}

impl AnnotationLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub level: AnnotationLevel,
    pub title: String,
    pub message: String,
}

/// Receives annotations one at a time. Implemented by the CI glue.
pub trait AnnotationSink {
    /// # Errors
    /// Returns error if the sink cannot accept the annotation.
    fn annotate(&mut self, annotation: &Annotation) -> std::io::Result<()>;
}

/// Builds the annotation list for `result`.
#[must_use]
pub fn create_annotations(result: &HealthcheckResult) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    for file in &result.results {
        if let Some(error) = &file.error {
            annotations.push(Annotation {
                path: file.file_path.clone(),
                start_line: 1,
                end_line: 1,
                level: AnnotationLevel::Error,
                title: "React Compiler Error".into(),
                message: error.clone(),
            });
            continue;
        }

        for failure in &file.compilation_result.failures {
            let start_line = failure.start_line().unwrap_or(1);
            let end_line = failure.end_line().unwrap_or(start_line);
            let name = failure.name();

            let mut message = format!(
                "Component \"{name}\" was not optimized by React Compiler.\n\nReason: {}",
                failure.reason()
            );
            let suggestions = failure.suggestions();
            if !suggestions.is_empty() {
                let bullets: Vec<String> = suggestions.iter().map(|s| format!("• {s}")).collect();
                message.push_str("\n\nSuggestions:\n");
                message.push_str(&bullets.join("\n"));
            }

            annotations.push(Annotation {
                path: file.file_path.clone(),
                start_line,
                end_line,
                level: AnnotationLevel::Warning,
                title: format!("React Compiler: {name} not optimized"),
                message,
            });
        }
    }

    annotations
}

/// Forwards every annotation to `sink` in order.
///
/// # Errors
/// Returns the first sink error; later annotations are not sent.
pub fn emit(annotations: &[Annotation], sink: &mut dyn AnnotationSink) -> std::io::Result<()> {
    for annotation in annotations {
        sink.annotate(annotation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CompilationResult, DiagnosticEvent, DiagnosticKind, FileCheckResult, SourceLocation,
        SourcePosition,
    };

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl AnnotationSink for Recorder {
        fn annotate(&mut self, annotation: &Annotation) -> std::io::Result<()> {
            self.0.push(annotation.title.clone());
            Ok(())
        }
    }

    #[test]
    fn test_end_line_defaults_to_start() {
        let event = DiagnosticEvent::new(
            DiagnosticKind::Diagnostic,
            None,
            Some(SourceLocation { start: Some(SourcePosition::line(4)), end: None }),
        );
        let result = HealthcheckResult::from_results(vec![FileCheckResult::compiled(
            "a.tsx",
            CompilationResult { successes: vec![], failures: vec![event] },
        )]);
        let a = &create_annotations(&result)[0];
        assert_eq!((a.start_line, a.end_line), (4, 4));
        assert_eq!(a.title, "React Compiler: anonymous not optimized");
        assert!(a.message.ends_with("Reason: Unknown reason"));
    }

    #[test]
    fn test_no_location_anchors_line_one() {
        let event = DiagnosticEvent::new(DiagnosticKind::PipelineError, Some("X"), None);
        let result = HealthcheckResult::from_results(vec![FileCheckResult::compiled(
            "a.tsx",
            CompilationResult { successes: vec![], failures: vec![event] },
        )]);
        let a = &create_annotations(&result)[0];
        assert_eq!((a.start_line, a.end_line), (1, 1));
    }

    #[test]
    fn test_emit_preserves_order() {
        let events = vec![
            DiagnosticEvent::new(DiagnosticKind::Error, Some("First"), None),
            DiagnosticEvent::new(DiagnosticKind::Error, Some("Second"), None),
        ];
        let result = HealthcheckResult::from_results(vec![
            FileCheckResult::errored("z.tsx", "boom"),
            FileCheckResult::compiled(
                "a.tsx",
                CompilationResult { successes: vec![], failures: events },
            ),
        ]);
        let mut sink = Recorder::default();
        emit(&create_annotations(&result), &mut sink).unwrap();
        assert_eq!(
            sink.0,
            [
                "React Compiler Error",
                "React Compiler: First not optimized",
                "React Compiler: Second not optimized"
            ]
        );
    }
}
