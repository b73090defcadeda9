//! Model warm-up
//!
//! The first inference call loads the model into memory, which can take far
//! longer than a normal request. One empty prompt is sent at startup and the
//! readiness gate opens once it returns, whatever the outcome.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::models::build_payload;
use crate::readiness::ReadinessGate;
use crate::services::LanguageModel;

/// Send the warm-up prompt, then mark the model ready
pub async fn warm_up(llm: &dyn LanguageModel, readiness: &ReadinessGate) {
    info!("Warming up language model");

    match llm.generate(&build_payload("", &[])).await {
        Ok(_) => info!("Language model warm-up call completed"),
        Err(e) => warn!(error = %e, "Language model warm-up call failed, marking ready anyway"),
    }

    readiness.mark_ready();
}

/// Run [`warm_up`] as a background task
pub fn spawn_warm_up(llm: Arc<dyn LanguageModel>, readiness: ReadinessGate) -> JoinHandle<()> {
    tokio::spawn(async move { warm_up(llm.as_ref(), &readiness).await })
}
