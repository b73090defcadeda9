//! Error types for spoofify
//!
//! Every stage of the band info pipeline reports failure through
//! [`PipelineError`]. Mapping to HTTP status happens only here.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::BandInfoError;
use crate::services::{GenreError, LlmError};

/// Seconds a client should wait before retrying while the model warms up
pub const NOT_READY_RETRY_AFTER_SECS: u64 = 5;

/// Pipeline failure taxonomy
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// Model warm-up has not finished (503)
    #[error("LLM isn't ready")]
    NotReady,

    /// Genre source or model server unreachable (502)
    #[error("Failed to reach upstream service: {0}")]
    UpstreamNetwork(String),

    /// Genre source or model server replied with an unexpected shape (502)
    #[error("Unexpected reply from upstream service: {0}")]
    UpstreamProtocol(String),

    /// Model text is not valid band info JSON (502)
    #[error("Failed to parse band info from LLM response: {0}")]
    ParseFailure(String),

    /// Genre source produced an empty genre (502)
    #[error("Genre source returned an empty genre")]
    EmptyGenre,

    /// HTML rendering call failed after the pipeline succeeded (502)
    #[error("Failed to render band info as HTML: {0}")]
    RenderFailure(String),
}

impl PipelineError {
    /// HTTP status reported for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            PipelineError::UpstreamNetwork(_)
            | PipelineError::UpstreamProtocol(_)
            | PipelineError::ParseFailure(_)
            | PipelineError::EmptyGenre
            | PipelineError::RenderFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Plain-text response used when serving rendered HTML
    pub fn into_text_response(self) -> Response {
        let status = self.status_code();
        let retry = self.retry_after();
        (status, retry, self.to_string()).into_response()
    }

    fn retry_after(&self) -> Option<[(header::HeaderName, String); 1]> {
        matches!(self, PipelineError::NotReady)
            .then(|| [(header::RETRY_AFTER, NOT_READY_RETRY_AFTER_SECS.to_string())])
    }
}

impl From<GenreError> for PipelineError {
    fn from(err: GenreError) -> Self {
        match err {
            GenreError::Network(msg) => PipelineError::UpstreamNetwork(msg),
            GenreError::Protocol(msg) => PipelineError::UpstreamProtocol(msg),
            GenreError::Empty => PipelineError::EmptyGenre,
        }
    }
}

impl From<LlmError> for PipelineError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Network(msg) => PipelineError::UpstreamNetwork(msg),
            LlmError::Protocol(msg) => PipelineError::UpstreamProtocol(msg),
        }
    }
}

impl From<BandInfoError> for PipelineError {
    fn from(err: BandInfoError) -> Self {
        PipelineError::ParseFailure(err.to_string())
    }
}

/// JSON error envelope: `{"error": message}`
impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let retry = self.retry_after();
        let body = Json(json!({ "error": self.to_string() }));
        (status, retry, body).into_response()
    }
}

/// Result type for pipeline stages
pub type PipelineResult<T> = Result<T, PipelineError>;
