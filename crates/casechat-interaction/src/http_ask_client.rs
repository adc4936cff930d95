//! HttpAskClient - `POST /ask` over reqwest.
//!
//! Sends `{"query": ...}` as JSON and parses `{"answer", "sources"}` back.
//! There is no retry and no timeout; a request lives until the backend
//! answers or the connection fails.

use async_trait::async_trait;
use casechat_core::ask::{AskClient, AskRequest, AskResponse};
use casechat_core::config::ChatConfig;
use casechat_core::{CaseChatError, Result};
use reqwest::Client;

/// [`AskClient`] implementation that talks to the backend over HTTP.
#[derive(Clone)]
pub struct HttpAskClient {
    client: Client,
    endpoint: String,
}

impl HttpAskClient {
    /// Creates a client posting to `endpoint` (the full `/ask` URL).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Creates a client reusing an existing reqwest `Client`.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Creates a client for the configured endpoint.
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.endpoint.clone())
    }
}

#[async_trait]
impl AskClient for HttpAskClient {
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        tracing::debug!("[HttpAskClient] POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| CaseChatError::request(format!("Ask request failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| CaseChatError::request(format!("Failed to read ask response: {err}")))?;

        if !status.is_success() {
            tracing::warn!("[HttpAskClient] Backend returned {}", status);
            return Err(CaseChatError::request(format!(
                "Backend returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed = AskResponse::from_json(&body)?;
        tracing::debug!(
            "[HttpAskClient] Received answer ({} chars, {} sources)",
            parsed.answer.chars().count(),
            parsed.sources.len()
        );
        Ok(parsed)
    }
}
