//! History panel entries.

use super::exchange::Exchange;
use serde::Serialize;

/// Query previews longer than this many characters are cut.
pub const DEFAULT_PREVIEW_CHARS: usize = 60;

/// A single row of the history panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// 1-based sequence label.
    pub number: usize,
    /// Query preview, cut at the configured character limit.
    pub preview: String,
    /// Timestamp recorded on the exchange.
    pub time: String,
}

impl HistoryEntry {
    /// Builds the entry for the exchange at 0-based `position`.
    pub fn from_exchange(position: usize, exchange: &Exchange, max_chars: usize) -> Self {
        Self {
            number: position + 1,
            preview: truncate_preview(&exchange.query, max_chars),
            time: exchange.time.clone(),
        }
    }
}

/// Cuts `text` to `max_chars` characters and appends `...` when anything was
/// removed. Counts characters, not bytes.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
