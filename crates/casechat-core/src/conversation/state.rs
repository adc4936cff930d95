//! Conversation state.

use super::exchange::Exchange;
use super::history::HistoryEntry;

/// The ordered list of completed exchanges plus the in-flight flag.
///
/// Insertion order is chronological. At most one request may be outstanding:
/// [`Conversation::try_begin_request`] refuses while the flag is set.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    exchanges: Vec<Exchange>,
    awaiting_response: bool,
}

impl Conversation {
    /// Creates an empty conversation with no request in flight.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Whether a request is currently outstanding.
    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    /// Sets the in-flight flag. Returns `false` if it was already set.
    pub fn try_begin_request(&mut self) -> bool {
        if self.awaiting_response {
            return false;
        }
        self.awaiting_response = true;
        true
    }

    /// Clears the in-flight flag.
    pub fn finish_request(&mut self) {
        self.awaiting_response = false;
    }

    /// Appends a completed exchange.
    pub fn push(&mut self, exchange: Exchange) {
        self.exchanges.push(exchange);
    }

    /// Drops every exchange and clears the in-flight flag.
    pub fn reset(&mut self) {
        self.exchanges.clear();
        self.awaiting_response = false;
    }

    /// Builds the history panel rows, numbered from 1.
    pub fn history_entries(&self, preview_chars: usize) -> Vec<HistoryEntry> {
        self.exchanges
            .iter()
            .enumerate()
            .map(|(position, exchange)| {
                HistoryEntry::from_exchange(position, exchange, preview_chars)
            })
            .collect()
    }
}
