//! Application layer for casechat.
//!
//! [`ChatController`] drives the chat page from user events and `/ask`
//! completions. [`HtmlChatView`] renders that page as HTML fragments.

pub mod controller;
pub mod html_view;

pub use controller::{ChatController, PendingAsk, REQUEST_FAILED_MESSAGE};
pub use html_view::HtmlChatView;
