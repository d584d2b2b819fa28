//! Renderers for a [`HealthcheckResult`](crate::types::HealthcheckResult).
//!
//! Every renderer is a pure function of the result: rendering the same
//! result twice yields identical text.

pub mod annotations;
pub mod console;
pub mod markdown;
mod shared;

pub use annotations::{create_annotations, emit, Annotation, AnnotationLevel, AnnotationSink};
pub use console::{print_console, render_console, ConsoleOptions};
pub use markdown::{render_markdown, MarkdownOptions};

use anyhow::Result;

/// Prints a serializable object as JSON to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}
