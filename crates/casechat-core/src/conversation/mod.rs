//! Conversation domain module.
//!
//! This module contains the in-memory conversation model: the exchanges
//! recorded during a chat session and the history entries derived from them.
//!
//! # Module Structure
//!
//! - `exchange`: one completed query/answer round-trip (`Exchange`)
//! - `history`: read-only history panel entries (`HistoryEntry`)
//! - `state`: the ordered exchange list plus the in-flight flag (`Conversation`)

mod exchange;
mod history;
mod state;

// Re-export public API
pub use exchange::Exchange;
pub use history::{HistoryEntry, truncate_preview, DEFAULT_PREVIEW_CHARS};
pub use state::Conversation;
