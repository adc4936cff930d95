//! External collaborators for casechat: the HTTP `/ask` client and the
//! Markdown renderer.

pub mod commonmark;
pub mod http_ask_client;

pub use commonmark::CommonMarkRenderer;
pub use http_ask_client::HttpAskClient;
