//! Domain layer for casechat.
//!
//! Holds the conversation model, case-law sources, inline citation
//! annotation and the traits the chat controller is written against
//! ([`ChatView`](view::ChatView), [`AskClient`](ask::AskClient),
//! [`MarkdownRenderer`](markdown::MarkdownRenderer)).

pub mod ask;
pub mod citation;
pub mod config;
pub mod conversation;
pub mod error;
pub mod markdown;
pub mod source;
pub mod view;

// Re-export common types
pub use error::{CaseChatError, Result};
pub use source::{Source, SourceCard};
