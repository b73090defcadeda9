//! Band info pipeline
//!
//! readiness check → genre fetch → band info inference → parse/validate.
//! The first failing stage ends the request; later stages are never invoked.

use chrono::Local;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{PipelineError, PipelineResult};
use crate::models::prompt::{band_info_prompt, render_html_prompt};
use crate::models::{build_payload, BandInfo};
use crate::readiness::ReadinessGate;
use crate::services::{GenreSource, LanguageModel};

pub struct BandInfoPipeline {
    genre_source: Arc<dyn GenreSource>,
    llm: Arc<dyn LanguageModel>,
    readiness: ReadinessGate,
}

impl BandInfoPipeline {
    pub fn new(
        genre_source: Arc<dyn GenreSource>,
        llm: Arc<dyn LanguageModel>,
        readiness: ReadinessGate,
    ) -> Self {
        Self {
            genre_source,
            llm,
            readiness,
        }
    }

    /// Fetch a random genre and invent a band for it
    pub async fn fetch_band_info(&self) -> PipelineResult<BandInfo> {
        self.ensure_ready()?;

        let genre = self.genre_source.fetch_genre().await.map_err(|e| {
            warn!(error = %e, "Genre fetch failed");
            PipelineError::from(e)
        })?;

        info!(genre = %genre, "Fetched genre");

        self.get_band_info(&genre).await
    }

    /// Invent a band for `genre`
    pub async fn get_band_info(&self, genre: &str) -> PipelineResult<BandInfo> {
        self.ensure_ready()?;

        let prompt = band_info_prompt(genre, Local::now().date_naive());
        let payload = build_payload(&prompt, &[]);

        let reply = self.llm.generate(&payload).await.map_err(|e| {
            warn!(genre = %genre, error = %e, "Band info inference failed");
            PipelineError::from(e)
        })?;

        let band_info = BandInfo::from_model_reply(genre, &reply).map_err(|e| {
            warn!(genre = %genre, error = %e, "Model reply rejected");
            PipelineError::from(e)
        })?;

        info!(
            genre = %genre,
            band_name = %band_info.band_name,
            members = band_info.band_members.len(),
            "Band info generated"
        );

        Ok(band_info)
    }

    /// Ask the model to present `band_info` as an HTML document
    ///
    /// Failures here are [`PipelineError::RenderFailure`] regardless of cause.
    pub async fn render_html(&self, band_info: &BandInfo) -> PipelineResult<String> {
        let band_json = serde_json::to_string(band_info)
            .map_err(|e| PipelineError::RenderFailure(e.to_string()))?;

        let payload = build_payload(&render_html_prompt(&band_json), &[]);

        let html = self.llm.generate(&payload).await.map_err(|e| {
            warn!(band_name = %band_info.band_name, error = %e, "HTML rendering failed");
            PipelineError::RenderFailure(e.to_string())
        })?;

        Ok(html)
    }

    pub fn readiness(&self) -> &ReadinessGate {
        &self.readiness
    }

    fn ensure_ready(&self) -> PipelineResult<()> {
        if self.readiness.is_ready() {
            Ok(())
        } else {
            Err(PipelineError::NotReady)
        }
    }
}
