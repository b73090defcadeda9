//! Language model client
//!
//! Sends prompt payloads to the model server's generate endpoint and returns the
//! raw reply text. The text is whatever the model produced; callers parse it.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::PromptPayload;

/// Path of the generate endpoint, relative to the model server base URL
pub const GENERATE_PATH: &str = "/api/generate";

/// Upper bound on a single inference request
///
/// Large prompts on a cold model can take longer than this; such calls fail
/// with [`LlmError::Network`].
pub const LLM_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Language model client errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    /// Server unreachable, connection dropped, or request timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Server replied, but not with the expected shape
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Inference backend used by the band info pipeline and warm-up
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one non-streaming generation and return the model's text
    async fn generate(&self, payload: &PromptPayload) -> Result<String, LlmError>;
}

/// Reply body of the generate endpoint. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// HTTP client for a llama model server
pub struct LlamaClient {
    http_client: reqwest::Client,
    generate_url: String,
}

impl LlamaClient {
    /// Create a client for the server at `base_url`, sharing `http_client`'s connection pool
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            generate_url: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PATH),
        }
    }

    /// Full URL requests are POSTed to
    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }
}

#[async_trait]
impl LanguageModel for LlamaClient {
    async fn generate(&self, payload: &PromptPayload) -> Result<String, LlmError> {
        tracing::debug!(
            url = %self.generate_url,
            model = %payload.model,
            prompt_chars = payload.prompt.len(),
            "Querying language model"
        );

        let response = self
            .http_client
            .post(&self.generate_url)
            .timeout(LLM_REQUEST_TIMEOUT)
            .json(payload)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();

        let body = response
            .bytes()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(LlmError::Protocol(format!(
                "model server returned {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            )));
        }

        let reply: GenerateResponse = serde_json::from_slice(&body)
            .map_err(|e| LlmError::Protocol(format!("unexpected reply: {}", e)))?;

        tracing::debug!(reply_chars = reply.response.len(), "Language model replied");

        Ok(reply.response)
    }
}
