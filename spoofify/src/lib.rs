//! spoofify library interface
//!
//! Fetches a random genre, asks a local language model to invent a band for
//! it, and serves the result as JSON or model-rendered HTML.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod readiness;
pub mod services;

pub use crate::error::{PipelineError, PipelineResult};
pub use crate::readiness::ReadinessGate;

use axum::Router;
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::services::BandInfoPipeline;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Genre → band info pipeline, including the readiness gate
    pub pipeline: Arc<BandInfoPipeline>,
    /// Serve `/` as rendered HTML instead of JSON
    pub render_html: bool,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: Arc<BandInfoPipeline>, render_html: bool) -> Self {
        Self {
            pipeline,
            render_html,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::band_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the HTTP listener, returning it with the address actually bound
///
/// Binding port 0 picks a free port; the returned address carries it.
pub async fn bind_listener(addr: SocketAddr) -> std::io::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    Ok((listener, local_addr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_listener_reports_assigned_port() {
        let requested: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let (listener, local_addr) = bind_listener(requested).await.unwrap();

        assert_ne!(local_addr.port(), 0);
        assert_eq!(local_addr.ip(), requested.ip());
        assert_eq!(listener.local_addr().unwrap(), local_addr);
    }
}
