//! The abstract chat view.
//!
//! `ChatView` stands in for the page elements the controller drives: the
//! message list, input box, loading indicator, history list, sources panel and
//! source modal. Implementations decide how each is drawn; the controller only
//! decides what is shown and when.

use crate::conversation::HistoryEntry;
use crate::source::SourceCard;
use serde::Serialize;
use std::fmt;

/// Identifies one rendered assistant message.
///
/// Ids increase monotonically for the lifetime of a controller and are never
/// reused, including across conversation resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An assistant bubble ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantMessage {
    pub id: MessageId,
    /// Rendered answer HTML, inline citation markers included.
    pub html: String,
    /// Number of sources behind the "show sources" trigger.
    pub source_count: usize,
    pub time: String,
}

/// Page surface driven by the chat controller.
pub trait ChatView {
    /// Appends a user bubble holding the raw query text.
    fn append_user_message(&mut self, text: &str);

    /// Appends an assistant bubble with its "show sources" trigger.
    fn append_assistant_message(&mut self, message: &AssistantMessage);

    /// Appends a visibly marked error bubble.
    fn append_error_message(&mut self, text: &str);

    /// Removes every bubble from the message list.
    fn clear_messages(&mut self);

    /// Shows the empty-conversation view with clickable example prompts.
    fn show_placeholder(&mut self, example_prompts: &[String]);

    /// Replaces the input box contents.
    fn set_input(&mut self, text: &str);

    /// Enables or disables the input box while a request is in flight.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Enables or disables the send control.
    fn set_send_enabled(&mut self, enabled: bool);

    /// Shows or hides the loading indicator.
    fn set_loading(&mut self, loading: bool);

    /// Re-renders the whole history panel.
    fn render_history(&mut self, entries: &[HistoryEntry]);

    /// Re-renders the whole sources panel.
    fn render_sources(&mut self, cards: &[SourceCard]);

    /// Opens the sources drawer.
    fn open_sources_drawer(&mut self);

    /// Fills the source modal with one card and shows it.
    fn show_source_modal(&mut self, card: &SourceCard);

    /// Scrolls the message list to the newest entry.
    fn scroll_to_latest(&mut self);
}
