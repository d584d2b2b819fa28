//! GitHub workflow commands (`::warning file=...::message`).

use crate::reporting::{Annotation, AnnotationSink};
use std::io::Write;

/// Writes annotations as workflow commands to any writer, usually stdout.
pub struct WorkflowCommandSink<W: Write> {
    out: W,
}

impl<W: Write> WorkflowCommandSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AnnotationSink for WorkflowCommandSink<W> {
    fn annotate(&mut self, annotation: &Annotation) -> std::io::Result<()> {
        writeln!(self.out, "{}", format_command(annotation))
    }
}

/// Renders one annotation as a workflow command line.
#[must_use]
pub fn format_command(annotation: &Annotation) -> String {
    format!(
        "::{} file={},line={},endLine={},title={}::{}",
        annotation.level.as_str(),
        escape_property(&annotation.path),
        annotation.start_line,
        annotation.end_line,
        escape_property(&annotation.title),
        escape_data(&annotation.message)
    )
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
