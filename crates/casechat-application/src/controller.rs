//! Chat view controller.
//!
//! `ChatController` owns the conversation state and drives a [`ChatView`]
//! from user events and from the completion of the `/ask` round-trip.
//!
//! Sending is split in two so the in-flight window is observable the way it
//! is in an event-driven page:
//!
//! 1. [`ChatController::begin_send`] runs on the send event. It validates the
//!    input, shows the user bubble and sets the in-flight flag.
//! 2. [`ChatController::complete`] runs when the request settles. It renders
//!    the answer or an error bubble and always clears the flag.
//!
//! [`ChatController::send`] chains both around the [`AskClient`] call.

use casechat_core::ask::{AskClient, AskRequest, AskResponse};
use casechat_core::citation::annotate_citations;
use casechat_core::config::{ChatConfig, DEFAULT_TIME_FORMAT};
use casechat_core::conversation::{Conversation, Exchange};
use casechat_core::markdown::MarkdownRenderer;
use casechat_core::source::{Source, source_cards};
use casechat_core::view::{AssistantMessage, ChatView, MessageId};
use casechat_core::Result;
use chrono::Local;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

/// Text of the bubble shown when a request fails.
pub const REQUEST_FAILED_MESSAGE: &str =
    "Sorry, something went wrong while contacting the assistant. Please try again.";

/// A request accepted by [`ChatController::begin_send`] and not yet completed.
///
/// Must be handed back to [`ChatController::complete`] exactly once.
#[derive(Debug)]
pub struct PendingAsk {
    request: AskRequest,
    generation: u64,
}

impl PendingAsk {
    pub fn request(&self) -> &AskRequest {
        &self.request
    }

    pub fn query(&self) -> &str {
        &self.request.query
    }
}

/// The chat view controller.
///
/// One instance per chat session. All state lives here; nothing is global.
pub struct ChatController<V: ChatView> {
    view: V,
    client: Arc<dyn AskClient>,
    markdown: Arc<dyn MarkdownRenderer>,
    config: ChatConfig,
    conversation: Conversation,
    /// Sources behind every assistant message currently on screen.
    rendered_sources: BTreeMap<MessageId, Vec<Source>>,
    latest_message: Option<MessageId>,
    next_message_id: u64,
    /// Bumped on reset so completions of requests sent before it are dropped.
    generation: u64,
    /// Last input text reported by the view.
    draft: String,
}

impl<V: ChatView> ChatController<V> {
    /// Creates a controller. Call [`ChatController::start`] before use.
    pub fn new(
        view: V,
        client: Arc<dyn AskClient>,
        markdown: Arc<dyn MarkdownRenderer>,
        config: ChatConfig,
    ) -> Self {
        Self {
            view,
            client,
            markdown,
            config,
            conversation: Conversation::new(),
            rendered_sources: BTreeMap::new(),
            latest_message: None,
            next_message_id: 1,
            generation: 0,
            draft: String::new(),
        }
    }

    /// Puts the view into its initial, empty state.
    pub fn start(&mut self) {
        self.show_empty_state();
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.conversation.is_awaiting_response()
    }

    /// Id of the most recently rendered assistant message.
    pub fn latest_message_id(&self) -> Option<MessageId> {
        self.latest_message
    }

    /// Input box changed: the send control is enabled only for non-blank text
    /// while nothing is in flight.
    pub fn on_input_changed(&mut self, text: &str) {
        self.draft = text.to_string();
        self.refresh_send_enabled();
    }

    /// Send event.
    ///
    /// Returns `None`, touching nothing, when the trimmed input is empty or a
    /// request is already in flight. Otherwise shows the user bubble, clears
    /// the input, sets the in-flight flag and returns the request to dispatch.
    pub fn begin_send(&mut self, input: &str) -> Option<PendingAsk> {
        let query = input.trim();
        if query.is_empty() {
            tracing::debug!("[ChatController] Ignoring empty input");
            return None;
        }
        if self.conversation.is_awaiting_response() {
            tracing::debug!("[ChatController] Ignoring send while a request is in flight");
            return None;
        }

        self.view.append_user_message(query);
        self.draft.clear();
        self.view.set_input("");
        self.conversation.try_begin_request();
        self.view.set_input_enabled(false);
        self.view.set_send_enabled(false);
        self.view.set_loading(true);

        tracing::info!("[ChatController] Sending query ({} chars)", query.chars().count());
        Some(PendingAsk {
            request: AskRequest::new(query),
            generation: self.generation,
        })
    }

    /// Completion of a request started by [`ChatController::begin_send`].
    ///
    /// Returns the id of the new assistant message on success. A completion
    /// for a request sent before the last reset is dropped without touching
    /// the view.
    pub fn complete(
        &mut self,
        pending: PendingAsk,
        result: Result<AskResponse>,
    ) -> Option<MessageId> {
        if pending.generation != self.generation {
            tracing::info!("[ChatController] Dropping response to a query sent before reset");
            return None;
        }

        let message_id = match result {
            Ok(response) => Some(self.render_answer(pending.request.query, response)),
            Err(err) => {
                tracing::warn!("[ChatController] Request failed: {}", err);
                self.view.append_error_message(REQUEST_FAILED_MESSAGE);
                None
            }
        };

        self.conversation.finish_request();
        self.view.set_loading(false);
        self.view.set_input_enabled(true);
        self.refresh_send_enabled();
        self.view.scroll_to_latest();

        message_id
    }

    /// Full send cycle: begin, call the backend, complete.
    ///
    /// Returns `false` when the input was rejected by the send gate.
    pub async fn send(&mut self, input: &str) -> bool {
        let Some(pending) = self.begin_send(input) else {
            return false;
        };
        let result = self.client.ask(pending.request()).await;
        self.complete(pending, result);
        true
    }

    /// Example prompt clicked: pre-fill the input with it and send it.
    ///
    /// Ignored without touching the input while a request is in flight.
    pub fn begin_example_prompt(&mut self, index: usize) -> Option<PendingAsk> {
        if self.conversation.is_awaiting_response() {
            tracing::debug!("[ChatController] Ignoring example prompt while in flight");
            return None;
        }
        let prompt = self.config.example_prompts.get(index)?.clone();
        self.view.set_input(&prompt);
        self.on_input_changed(&prompt);
        self.begin_send(&prompt)
    }

    /// [`ChatController::begin_example_prompt`] followed by the round-trip.
    pub async fn send_example_prompt(&mut self, index: usize) -> bool {
        let Some(pending) = self.begin_example_prompt(index) else {
            return false;
        };
        let result = self.client.ask(pending.request()).await;
        self.complete(pending, result);
        true
    }

    /// Inline marker clicked: show the referenced source of that message in
    /// the modal. Returns `false` if the message or index is unknown.
    pub fn on_citation_clicked(&mut self, message: MessageId, index: usize) -> bool {
        let Some(source) = self
            .rendered_sources
            .get(&message)
            .and_then(|sources| sources.get(index))
        else {
            tracing::debug!(
                "[ChatController] No source {} on message {}",
                index,
                message
            );
            return false;
        };

        let card = source.to_card(index);
        self.view.show_source_modal(&card);
        true
    }

    /// "Show sources" clicked on a message: load that message's sources into
    /// the panel and open the drawer.
    pub fn on_show_sources(&mut self, message: MessageId) -> bool {
        let Some(sources) = self.rendered_sources.get(&message) else {
            return false;
        };

        let cards = source_cards(sources);
        self.view.render_sources(&cards);
        self.view.open_sources_drawer();
        true
    }

    /// Clears the conversation and restores the empty view.
    pub fn reset(&mut self) {
        tracing::info!(
            "[ChatController] Resetting conversation ({} exchanges)",
            self.conversation.len()
        );
        self.conversation.reset();
        self.rendered_sources.clear();
        self.latest_message = None;
        self.generation += 1;
        self.draft.clear();
        self.show_empty_state();
    }

    fn show_empty_state(&mut self) {
        self.view.clear_messages();
        self.view.show_placeholder(&self.config.example_prompts);
        self.view.set_input("");
        self.view.render_history(&[]);
        self.view.render_sources(&[]);
        self.view.set_loading(false);
        self.view.set_input_enabled(true);
        self.refresh_send_enabled();
    }

    fn render_answer(&mut self, query: String, response: AskResponse) -> MessageId {
        let AskResponse { answer, sources } = response;

        let annotated = annotate_citations(&answer, &sources);
        let html = self.markdown.render(&annotated);
        let time = self.timestamp();

        let id = MessageId(self.next_message_id);
        self.next_message_id += 1;

        self.view.append_assistant_message(&AssistantMessage {
            id,
            html,
            source_count: sources.len(),
            time: time.clone(),
        });

        let cards = source_cards(&sources);
        self.rendered_sources.insert(id, sources.clone());
        self.latest_message = Some(id);
        self.conversation.push(Exchange::new(query, answer, sources, time));

        self.view
            .render_history(&self.conversation.history_entries(self.config.history_preview_chars));
        self.view.render_sources(&cards);

        tracing::info!(
            "[ChatController] Rendered answer {} with {} sources",
            id,
            cards.len()
        );
        id
    }

    fn refresh_send_enabled(&mut self) {
        let enabled = !self.draft.trim().is_empty() && !self.conversation.is_awaiting_response();
        self.view.set_send_enabled(enabled);
    }

    fn timestamp(&self) -> String {
        let now = Local::now();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.config.time_format)).is_err() {
            tracing::warn!(
                "[ChatController] Invalid time format {:?}, using default",
                self.config.time_format
            );
            out = now.format(DEFAULT_TIME_FORMAT).to_string();
        }
        out
    }
}
