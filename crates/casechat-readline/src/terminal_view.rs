//! Terminal rendition of the chat page.

use casechat_core::conversation::HistoryEntry;
use casechat_core::source::SourceCard;
use casechat_core::view::{AssistantMessage, ChatView};
use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r##"<a href="#" class="citation-marker" data-source-index="\d+">(\[\d+\])</a>"##)
        .expect("marker pattern is valid")
});
static BLOCK_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</(?:p|h[1-6]|pre|blockquote|tr|ul|ol|table)>|<br\s*/?>|<hr\s*/?>")
        .expect("block pattern is valid")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));
static BLANK_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank pattern is valid"));

/// Flattens rendered answer HTML into terminal text.
///
/// Citation markers keep their `[n]` label; other markup is dropped.
pub fn html_to_text(html: &str) -> String {
    let text = MARKER_RE.replace_all(html, "$1").replace("<li>", "- ");
    let text = BLOCK_END_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    BLANK_RUN_RE.replace_all(text.trim(), "\n\n").into_owned()
}

/// Card heading: the `[n]` badge, followed by the case name when known.
fn card_heading(card: &SourceCard) -> String {
    match &card.case_name {
        Some(name) => format!("[{}] {}", card.number, name),
        None => format!("[{}]", card.number),
    }
}

/// [`ChatView`] printing to stdout with colors.
///
/// History and sources are kept so the REPL can print them on request. The
/// prompt is blocked while a request runs, so input enablement is not drawn.
#[derive(Debug, Default)]
pub struct TerminalView {
    input: String,
    history: Vec<HistoryEntry>,
    sources: Vec<SourceCard>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text the next prompt starts with.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn print_history(&self) {
        if self.history.is_empty() {
            println!("{}", "No questions yet.".bright_black());
            return;
        }
        for entry in &self.history {
            println!(
                "{} {} {}",
                format!("{}.", entry.number).bright_magenta(),
                entry.preview,
                entry.time.bright_black()
            );
        }
    }

    fn print_card(card: &SourceCard) {
        println!("{}", card_heading(card).bright_cyan().bold());
        if let Some(citation) = &card.citation {
            println!("    {}", citation);
        }
        if let Some(court_line) = &card.court_line {
            println!("    {}", court_line.bright_black());
        }
        if let Some(summary) = &card.summary {
            println!("    {}", summary);
        }
        if let Some(url) = &card.saflii_url {
            println!("    {} {}", "View original:".bright_black(), url.underline());
        }
        if let Some(url) = &card.pdf_url {
            println!("    {} {}", "Open document:".bright_black(), url.underline());
        }
    }
}

impl ChatView for TerminalView {
    fn append_user_message(&mut self, text: &str) {
        println!("{}", format!("> {}", text).green());
    }

    fn append_assistant_message(&mut self, message: &AssistantMessage) {
        println!("{}", format!("[#{}]", message.id).bright_magenta());
        for line in html_to_text(&message.html).lines() {
            println!("{}", line.bright_blue());
        }

        let meta = if message.source_count > 0 {
            format!(
                "{}  {} sources, /sources {}",
                message.time, message.source_count, message.id
            )
        } else {
            message.time.clone()
        };
        println!("{}", meta.bright_black());
        println!();
    }

    fn append_error_message(&mut self, text: &str) {
        println!("{}", text.red());
    }

    fn clear_messages(&mut self) {
        println!("{}", "--- New conversation ---".bright_magenta());
    }

    fn show_placeholder(&mut self, example_prompts: &[String]) {
        println!("{}", "Ask a question about South African case law.".bright_black());
        for (i, prompt) in example_prompts.iter().enumerate() {
            println!("  {} {}", format!("/example {}", i + 1).bright_cyan(), prompt);
        }
        println!();
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn set_input_enabled(&mut self, _enabled: bool) {}

    fn set_send_enabled(&mut self, _enabled: bool) {}

    fn set_loading(&mut self, loading: bool) {
        if loading {
            println!("{}", "Thinking...".bright_black());
        }
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        self.history = entries.to_vec();
    }

    fn render_sources(&mut self, cards: &[SourceCard]) {
        self.sources = cards.to_vec();
    }

    fn open_sources_drawer(&mut self) {
        if self.sources.is_empty() {
            println!("{}", "No sources for this answer.".bright_black());
            return;
        }
        println!("{}", "Sources".bright_yellow().bold());
        for card in &self.sources {
            Self::print_card(card);
        }
        println!();
    }

    fn show_source_modal(&mut self, card: &SourceCard) {
        Self::print_card(card);
        println!();
    }

    fn scroll_to_latest(&mut self) {}
}
