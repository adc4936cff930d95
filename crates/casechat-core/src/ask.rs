//! The `/ask` wire types and the client trait.
//!
//! Decouples the chat controller from the transport, so it can be driven by
//! an HTTP client in production and a scripted mock in tests.

use crate::error::{CaseChatError, Result};
use crate::source::Source;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

impl AskRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Parsed response of `POST /ask`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub sources: Vec<Source>,
}

impl AskResponse {
    /// Parses a response body.
    ///
    /// Only a body that is not JSON at all is an error. Inside a JSON body:
    /// - a missing or non-string `answer` becomes `""`
    /// - a missing or non-array `sources` becomes `[]`
    /// - array entries that are not objects are dropped
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| CaseChatError::request(format!("Response is not JSON: {e}")))?;
        Ok(Self::from_value(&value))
    }

    /// Reads a response out of an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Self {
        let answer = value
            .get("answer")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let sources = value
            .get("sources")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Source::from_value).collect())
            .unwrap_or_default();

        Self { answer, sources }
    }
}

/// An abstract client for the question-answering backend.
///
/// Every failure (transport, HTTP status, unreadable body) must be reported
/// as [`CaseChatError::Request`].
#[async_trait]
pub trait AskClient: Send + Sync {
    /// Sends one query and waits for the answer.
    ///
    /// # Arguments
    ///
    /// * `request` - The query to send
    ///
    /// # Returns
    ///
    /// - `Ok(AskResponse)`: The backend answered with a JSON body
    /// - `Err(CaseChatError::Request)`: The round-trip failed
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse>;
}
