//! Band info endpoints
//!
//! - `GET /`     rendered HTML, or JSON when HTML rendering is disabled
//! - `GET /json` always JSON, errors as `{"error": message}`

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::warn;

use crate::error::PipelineError;
use crate::services::BandInfoPipeline;
use crate::AppState;

/// GET /
pub async fn index(State(state): State<AppState>) -> Response {
    if state.render_html {
        present_html(&state.pipeline).await
    } else {
        present_json(&state.pipeline).await
    }
}

/// GET /json
pub async fn band_json(State(state): State<AppState>) -> Response {
    present_json(&state.pipeline).await
}

/// Structured mode: band info JSON or the JSON error envelope
pub async fn present_json(pipeline: &BandInfoPipeline) -> Response {
    match pipeline.fetch_band_info().await {
        Ok(band_info) => Json(band_info).into_response(),
        Err(e) => {
            log_failure(&e);
            e.into_response()
        }
    }
}

/// Rendered mode: band info turned into an HTML page by a second model call
///
/// Pipeline failures keep their own status; a failed rendering call is a 502.
pub async fn present_html(pipeline: &BandInfoPipeline) -> Response {
    let band_info = match pipeline.fetch_band_info().await {
        Ok(band_info) => band_info,
        Err(e) => {
            log_failure(&e);
            return e.into_text_response();
        }
    };

    match pipeline.render_html(&band_info).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log_failure(&e);
            e.into_text_response()
        }
    }
}

fn log_failure(err: &PipelineError) {
    warn!(status = err.status_code().as_u16(), error = %err, "Band info request failed");
}

/// Build band info routes
pub fn band_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/json", get(band_json))
}
