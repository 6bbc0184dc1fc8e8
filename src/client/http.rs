//! HTTP implementation of the exchange client

use super::traits::{ExchangeClient, ExchangeError};
use crate::protocol::{ChatReply, ChatRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Exchange client that posts to a reply server's `/chat` endpoint
pub struct HttpExchangeClient {
    client: Client,
    chat_url: String,
}

impl HttpExchangeClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            chat_url: format!("{}/chat", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ExchangeClient for HttpExchangeClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ExchangeError> {
        let response = self
            .client
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExchangeError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    ExchangeError::network(format!("Connection failed: {e}"))
                } else {
                    ExchangeError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            // Failure bodies carry the reply shape; surface its error field
            // when present, the bare status line otherwise
            let message = serde_json::from_str::<ChatReply>(&body)
                .ok()
                .and_then(|reply| reply.error)
                .filter(|error| !error.is_empty())
                .unwrap_or_else(|| format!("HTTP error! Status: {}", status.as_u16()));
            return Err(ExchangeError::status(status.as_u16(), message));
        }

        serde_json::from_str(&body)
            .map_err(|e| ExchangeError::malformed(format!("Failed to parse response: {e}")))
    }
}
