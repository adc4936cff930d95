//! Markdown rendering capability.

/// Turns Markdown into HTML.
///
/// The chat controller inserts the output into the page verbatim; any
/// escaping or sanitizing is the implementation's responsibility.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}
