//! CommonMark rendering with pulldown-cmark.

use casechat_core::markdown::MarkdownRenderer;
use pulldown_cmark::{Options, Parser, html};

/// [`MarkdownRenderer`] backed by pulldown-cmark.
///
/// Inline HTML in the source (such as citation markers) is passed through
/// unchanged. Tables and strikethrough are enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMarkRenderer;

impl CommonMarkRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_STRIKETHROUGH);
        opts.insert(Options::ENABLE_TABLES);

        let parser = Parser::new_ext(markdown, opts);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casechat_core::citation::{marker_indices, render_marker};

    #[test]
    fn test_renders_emphasis_and_paragraphs() {
        let html = CommonMarkRenderer.render("The **onus** rests on the employer.");
        assert_eq!(html, "<p>The <strong>onus</strong> rests on the employer.</p>\n");
    }

    #[test]
    fn test_citation_markers_pass_through() {
        let markdown = format!(
            "Held in [2011] ZALAC 7{} that the dismissal was unfair.",
            render_marker(0)
        );
        let html = CommonMarkRenderer.render(&markdown);
        assert!(html.contains(&render_marker(0)));
        assert_eq!(marker_indices(&html), vec![0]);
    }

    #[test]
    fn test_empty_answer_renders_empty() {
        assert_eq!(CommonMarkRenderer.render(""), "");
    }
}
