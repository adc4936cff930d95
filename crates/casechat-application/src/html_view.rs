//! HTML rendition of the chat page.
//!
//! `HtmlChatView` implements [`ChatView`] by keeping every page region as an
//! HTML fragment rendered from minijinja templates. The page can be rendered
//! as a whole with [`HtmlChatView::page_html`], or region by region for a host
//! that patches an existing DOM.
//!
//! Templates are auto-escaped. The assistant bubble body is the one exception:
//! it comes from the Markdown renderer and is inserted as-is.

use casechat_core::conversation::HistoryEntry;
use casechat_core::source::SourceCard;
use casechat_core::view::{AssistantMessage, ChatView};
use casechat_core::{CaseChatError, Result};
use minijinja::{Environment, context};
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("page.html", include_str!("../templates/page.html")),
    ("user_message.html", include_str!("../templates/user_message.html")),
    ("assistant_message.html", include_str!("../templates/assistant_message.html")),
    ("error_message.html", include_str!("../templates/error_message.html")),
    ("placeholder.html", include_str!("../templates/placeholder.html")),
    ("history.html", include_str!("../templates/history.html")),
    ("source_card.html", include_str!("../templates/source_card.html")),
    ("sources.html", include_str!("../templates/sources.html")),
    ("source_modal.html", include_str!("../templates/source_modal.html")),
];

/// Chat page kept as rendered HTML fragments.
pub struct HtmlChatView {
    env: Environment<'static>,
    messages: Vec<String>,
    placeholder: Option<String>,
    input: String,
    input_enabled: bool,
    send_enabled: bool,
    loading: bool,
    history: String,
    sources: String,
    modal: Option<String>,
    drawer_open: bool,
    scroll_to_latest: bool,
}

impl HtmlChatView {
    /// Creates an empty page.
    ///
    /// # Errors
    ///
    /// Returns a render error if a bundled template fails to compile.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| CaseChatError::render(format!("Template {name}: {e}")))?;
        }

        Ok(Self {
            env,
            messages: Vec::new(),
            placeholder: None,
            input: String::new(),
            input_enabled: true,
            send_enabled: false,
            loading: false,
            history: String::new(),
            sources: String::new(),
            modal: None,
            drawer_open: false,
            scroll_to_latest: false,
        })
    }

    /// Renders the full page from the current regions.
    pub fn page_html(&self) -> Result<String> {
        self.try_render(
            "page.html",
            context! {
                messages => &self.messages,
                placeholder => &self.placeholder,
                input => &self.input,
                input_enabled => self.input_enabled,
                send_enabled => self.send_enabled,
                loading => self.loading,
                history => &self.history,
                sources => &self.sources,
                modal => &self.modal,
                drawer_open => self.drawer_open,
                scroll_to_latest => self.scroll_to_latest,
            },
        )
    }

    /// Message list bubbles, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn placeholder_html(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn is_send_enabled(&self) -> bool {
        self.send_enabled
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn history_html(&self) -> &str {
        &self.history
    }

    pub fn sources_html(&self) -> &str {
        &self.sources
    }

    pub fn modal_html(&self) -> Option<&str> {
        self.modal.as_deref()
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Dismisses the source modal.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    fn try_render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|e| CaseChatError::render(format!("Template {name}: {e}")))
    }

    // ChatView methods cannot fail, so a broken template leaves the region empty.
    fn render<S: Serialize>(&self, name: &str, ctx: S) -> String {
        self.try_render(name, ctx).unwrap_or_else(|e| {
            tracing::error!("[HtmlChatView] {}", e);
            String::new()
        })
    }
}

impl ChatView for HtmlChatView {
    fn append_user_message(&mut self, text: &str) {
        self.placeholder = None;
        let html = self.render("user_message.html", context! { text => text });
        self.messages.push(html);
    }

    fn append_assistant_message(&mut self, message: &AssistantMessage) {
        self.placeholder = None;
        let html = self.render("assistant_message.html", context! { message => message });
        self.messages.push(html);
    }

    fn append_error_message(&mut self, text: &str) {
        self.placeholder = None;
        let html = self.render("error_message.html", context! { text => text });
        self.messages.push(html);
    }

    fn clear_messages(&mut self) {
        self.messages.clear();
        self.scroll_to_latest = false;
    }

    fn show_placeholder(&mut self, example_prompts: &[String]) {
        let html = self.render("placeholder.html", context! { prompts => example_prompts });
        self.placeholder = Some(html);
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        self.history = self.render("history.html", context! { entries => entries });
    }

    fn render_sources(&mut self, cards: &[SourceCard]) {
        self.sources = self.render("sources.html", context! { cards => cards });
    }

    fn open_sources_drawer(&mut self) {
        self.drawer_open = true;
    }

    fn show_source_modal(&mut self, card: &SourceCard) {
        self.modal = Some(self.render("source_modal.html", context! { card => card }));
    }

    fn scroll_to_latest(&mut self) {
        self.scroll_to_latest = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casechat_core::citation::render_marker;
    use casechat_core::source::Source;
    use casechat_core::view::MessageId;

    fn view() -> HtmlChatView {
        HtmlChatView::new().expect("Bundled templates should compile")
    }

    fn full_source() -> Source {
        Source {
            case_name: Some("Atamelang Bus Transport (Pty) Ltd v MEC for Community Safety".into()),
            neutral_citation: Some("[2025] ZANWHC 191".into()),
            court: Some("North West High Court".into()),
            judgment_date: Some("2025-06-12".into()),
            summary: Some("Delictual claim arising from a bus collision...".into()),
            saflii_url: Some("https://www.saflii.org/za/cases/ZANWHC/2025/191.html".into()),
            pdf_url: Some("https://www.saflii.org/za/cases/ZANWHC/2025/191.pdf".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_card_without_urls_has_no_links() {
        let mut view = view();
        let source = Source {
            case_name: Some("S v Makwanyane".into()),
            citation: Some("[1995] ZACC 3".into()),
            ..Default::default()
        };

        view.render_sources(&[source.to_card(0)]);

        let html = view.sources_html();
        assert!(html.contains("S v Makwanyane"));
        assert!(html.contains("[1995] ZACC 3"));
        assert!(!html.contains("<a"));
        assert!(!html.contains("source-links"));
        assert!(!html.contains("court-line"));
        assert!(!html.contains("summary"));
    }

    #[test]
    fn test_card_with_urls_has_both_links() {
        let mut view = view();
        view.render_sources(&[full_source().to_card(0)]);

        let html = view.sources_html();
        assert_eq!(html.matches("<a ").count(), 2);
        assert!(html.contains("www.saflii.org"));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains("View original"));
        assert!(html.contains("Open document"));
        assert!(html.contains("North West High Court · 2025-06-12"));
        assert!(html.contains(r#"<span class="badge">1</span>"#));
    }

    #[test]
    fn test_only_present_link_is_rendered() {
        let mut view = view();
        let source = Source {
            pdf_url: Some("https://example.org/judgment.pdf".into()),
            ..Default::default()
        };
        view.render_sources(&[source.to_card(0)]);

        let html = view.sources_html();
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains("Open document"));
        assert!(!html.contains("View original"));
    }

    #[test]
    fn test_empty_sources_panel() {
        let mut view = view();
        view.render_sources(&[]);
        assert!(view.sources_html().contains("sources-empty"));
        assert!(!view.sources_html().contains("source-card"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut view = view();
        view.append_user_message("<script>alert(1)</script>");
        assert!(view.messages()[0].contains("&lt;script&gt;"));
        assert!(!view.messages()[0].contains("<script>"));
    }

    #[test]
    fn test_assistant_html_is_inserted_verbatim() {
        let mut view = view();
        let html = format!("<p>Held in [2011] ZALAC 7{}.</p>", render_marker(0));
        view.append_assistant_message(&AssistantMessage {
            id: MessageId(3),
            html: html.clone(),
            source_count: 1,
            time: "09:15".into(),
        });

        let bubble = &view.messages()[0];
        assert!(bubble.contains(&html));
        assert!(bubble.contains(r#"data-message-id="3""#));
        assert!(bubble.contains("Show sources (1)"));
        assert!(bubble.contains("09:15"));
    }

    #[test]
    fn test_show_sources_hidden_without_sources() {
        let mut view = view();
        view.append_assistant_message(&AssistantMessage {
            id: MessageId(1),
            html: "<p>No cases found.</p>".into(),
            source_count: 0,
            time: "09:15".into(),
        });
        assert!(!view.messages()[0].contains("show-sources"));
    }

    #[test]
    fn test_placeholder_lists_prompts_until_first_message() {
        let mut view = view();
        view.show_placeholder(&["What is estoppel?".to_string(), "Define dolus".to_string()]);

        let placeholder = view.placeholder_html().unwrap();
        assert!(placeholder.contains(r#"data-prompt-index="0""#));
        assert!(placeholder.contains(r#"data-prompt-index="1""#));
        assert!(placeholder.contains("What is estoppel?"));

        view.append_user_message("What is estoppel?");
        assert!(view.placeholder_html().is_none());
    }

    #[test]
    fn test_history_entries_render_in_order() {
        let mut view = view();
        view.render_history(&[
            HistoryEntry { number: 1, preview: "first".into(), time: "10:00".into() },
            HistoryEntry { number: 2, preview: "second".into(), time: "10:05".into() },
        ]);

        let html = view.history_html();
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert!(html.contains(r#"<span class="history-number">2.</span>"#));
    }

    #[test]
    fn test_modal_shows_single_card() {
        let mut view = view();
        view.show_source_modal(&full_source().to_card(2));

        let modal = view.modal_html().unwrap();
        assert!(modal.contains("[3] Atamelang Bus Transport"));
        assert_eq!(modal.matches("source-card").count(), 1);

        view.close_modal();
        assert!(view.modal_html().is_none());
    }

    #[test]
    fn test_modal_without_case_name_shows_only_badge() {
        let mut view = view();
        let source = Source {
            citation: Some("[2011] ZALAC 7".into()),
            ..Default::default()
        };
        view.show_source_modal(&source.to_card(0));

        let modal = view.modal_html().unwrap();
        assert!(modal.contains(r#"<h3 class="modal-title">[1]</h3>"#));
        assert!(!modal.contains("Source</h3>"));
        assert!(!modal.contains("case-name"));
        assert!(modal.contains("[2011] ZALAC 7"));
    }

    #[test]
    fn test_page_reflects_flags() {
        let mut view = view();
        view.set_input_enabled(false);
        view.set_send_enabled(false);
        view.set_loading(true);

        let page = view.page_html().unwrap();
        assert!(page.contains(r#"<textarea id="queryInput" name="query" disabled>"#));
        assert!(page.contains(r#"<button type="submit" id="sendButton" disabled>"#));
        assert!(page.contains("loadingIndicator"));

        view.set_input_enabled(true);
        view.set_send_enabled(true);
        view.set_loading(false);

        let page = view.page_html().unwrap();
        assert!(page.contains(r#"<textarea id="queryInput" name="query">"#));
        assert!(page.contains(r#"<button type="submit" id="sendButton">"#));
        assert!(!page.contains("loadingIndicator"));
    }
}
