//! Exchange domain model.

use crate::source::Source;
use serde::{Deserialize, Serialize};

/// One user query paired with its assistant answer and supporting sources.
///
/// An exchange is only created after a successful round-trip and is never
/// modified once appended to a [`Conversation`](super::Conversation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// The query as the user sent it (trimmed).
    pub query: String,
    /// The raw answer text, before annotation and Markdown rendering.
    pub answer: String,
    /// Sources backing this answer, in server order.
    pub sources: Vec<Source>,
    /// Display timestamp recorded when the answer arrived.
    pub time: String,
}

impl Exchange {
    pub fn new(
        query: impl Into<String>,
        answer: impl Into<String>,
        sources: Vec<Source>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
            sources,
            time: time.into(),
        }
    }
}
