//! Upstream clients and the band info pipeline

pub mod band_info_pipeline;
pub mod genre_client;
pub mod llm_client;
pub mod warm_up;

pub use band_info_pipeline::BandInfoPipeline;
pub use genre_client::{GenreError, GenreSource, GenrenatorClient};
pub use llm_client::{LanguageModel, LlamaClient, LlmError};
pub use warm_up::{spawn_warm_up, warm_up};

use std::time::Duration;

const USER_AGENT: &str = concat!("spoofify/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every upstream client
///
/// Per-request timeouts are set by each client.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(10))
        .build()
}
