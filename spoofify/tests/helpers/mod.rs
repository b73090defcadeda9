//! Shared test helpers
//!
//! Call-counting stand-ins for the genre source and language model, plus a
//! pipeline builder wired to them.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use spoofify::models::PromptPayload;
use spoofify::services::{BandInfoPipeline, GenreError, GenreSource, LanguageModel, LlmError};
use spoofify::{build_router, AppState, ReadinessGate};

/// A reply the model is expected to accept as valid band info
pub const VALID_BAND_REPLY: &str = r#"{"band_name":"Test","band_members":["A"],"top_songs":["1","2","3","4","5"],"related_bands":["X","Y","Z","W","V"],"next_tour_date":"2025-01-01"}"#;

/// Genre source returning a fixed result
pub struct StubGenreSource {
    result: Result<String, GenreError>,
    calls: AtomicUsize,
}

impl StubGenreSource {
    pub fn returning(genre: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(genre.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(err: GenreError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenreSource for StubGenreSource {
    async fn fetch_genre(&self) -> Result<String, GenreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            // Mirror the real client: empty genres are an error
            Ok(genre) if genre.trim().is_empty() => Err(GenreError::Empty),
            other => other.clone(),
        }
    }
}

/// Language model answering from a script, in order
pub struct StubLanguageModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    payloads: Mutex<Vec<PromptPayload>>,
}

impl StubLanguageModel {
    pub fn scripted(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            payloads: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::scripted(vec![Ok(text.to_string())])
    }

    pub fn failing(err: LlmError) -> Arc<Self> {
        Self::scripted(vec![Err(err)])
    }

    pub fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    pub fn payloads(&self) -> Vec<PromptPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for StubLanguageModel {
    async fn generate(&self, payload: &PromptPayload) -> Result<String, LlmError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Protocol("no scripted reply".to_string())))
    }
}

/// Pipeline over stubs, optionally already warmed up
pub fn pipeline(
    genre_source: Arc<StubGenreSource>,
    llm: Arc<StubLanguageModel>,
    ready: bool,
) -> BandInfoPipeline {
    let readiness = ReadinessGate::new();
    if ready {
        readiness.mark_ready();
    }
    BandInfoPipeline::new(genre_source, llm, readiness)
}

/// Router over stubs
pub fn app(
    genre_source: Arc<StubGenreSource>,
    llm: Arc<StubLanguageModel>,
    ready: bool,
    render_html: bool,
) -> axum::Router {
    let pipeline = Arc::new(pipeline(genre_source, llm, ready));
    build_router(AppState::new(pipeline, render_html))
}
