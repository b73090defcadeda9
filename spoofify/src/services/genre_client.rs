//! Genre source client
//!
//! The genre service answers with a JSON string literal (e.g. `"\"Glitch Fado\""`),
//! so the body is decoded as JSON rather than read as raw text.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Public genre generator returning one genre per call
pub const DEFAULT_GENRE_URL: &str = "https://binaryjazz.us/wp-json/genrenator/v1/genre/1";

/// Upper bound on a genre request
pub const GENRE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Genre source errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenreError {
    /// Service unreachable or request timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Service replied with something other than a JSON string
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Service replied with an empty genre
    #[error("Genre source returned an empty genre")]
    Empty,
}

/// Source of random genres
#[async_trait]
pub trait GenreSource: Send + Sync {
    async fn fetch_genre(&self) -> Result<String, GenreError>;
}

/// HTTP client for the genre generator service
pub struct GenrenatorClient {
    http_client: reqwest::Client,
    url: String,
}

impl GenrenatorClient {
    pub fn new(http_client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenreSource for GenrenatorClient {
    async fn fetch_genre(&self) -> Result<String, GenreError> {
        tracing::debug!(url = %self.url, "Fetching genre");

        let response = self
            .http_client
            .get(&self.url)
            .timeout(GENRE_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| GenreError::Network(e.to_string()))?;

        let status = response.status();

        let body = response
            .bytes()
            .await
            .map_err(|e| GenreError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(GenreError::Protocol(format!(
                "genre service returned {}",
                status.as_u16()
            )));
        }

        decode_genre(&body)
    }
}

/// Decode a genre service body into the genre string
pub fn decode_genre(body: &[u8]) -> Result<String, GenreError> {
    let genre: String = serde_json::from_slice(body)
        .map_err(|e| GenreError::Protocol(format!("expected a JSON string: {}", e)))?;

    if genre.trim().is_empty() {
        return Err(GenreError::Empty);
    }

    Ok(genre)
}
