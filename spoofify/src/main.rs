//! spoofify - fictional band generator
//!
//! Serves a freshly invented band for a random genre on every request. A
//! background task warms up the language model at startup; until it finishes,
//! band requests are answered with 503.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spoofify::config::{Args, ServiceConfig};
use spoofify::services::{
    build_http_client, spawn_warm_up, BandInfoPipeline, GenreSource, GenrenatorClient,
    LanguageModel, LlamaClient,
};
use spoofify::{bind_listener, build_router, AppState, ReadinessGate};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config file is read before tracing starts so its log level can apply;
    // where it came from is logged once the subscriber is installed
    let (toml_config, config_source) =
        spoofify_common::config::load_or_default(args.config.as_deref())
            .context("Failed to load configuration file")?;

    let log_level = toml_config.log_level();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("spoofify={log_level},tower_http={log_level}"))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting spoofify v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_COMMIT"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    config_source.log();

    let config = ServiceConfig::resolve(&args, &toml_config).context("Invalid configuration")?;
    info!("Language model: {}", config.llama_url);
    info!("Genre source: {}", config.genre_url);
    info!("Log level: {}", config.log_level);
    info!(
        "Index mode: {}",
        if config.render_html { "rendered HTML" } else { "JSON" }
    );

    // One connection pool for the life of the process
    let http_client = build_http_client().context("Failed to build HTTP client")?;

    let llm: Arc<dyn LanguageModel> =
        Arc::new(LlamaClient::new(http_client.clone(), &config.llama_url));
    let genre_source: Arc<dyn GenreSource> =
        Arc::new(GenrenatorClient::new(http_client, config.genre_url.clone()));

    let readiness = ReadinessGate::new();
    let pipeline = Arc::new(BandInfoPipeline::new(
        genre_source,
        Arc::clone(&llm),
        readiness.clone(),
    ));

    let warm_up_task = spawn_warm_up(llm, readiness);

    let app = build_router(AppState::new(pipeline, config.render_html));

    let (listener, local_addr) = bind_listener(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("Listening on http://{}", local_addr);
    info!("Health check: http://{}/health", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if !warm_up_task.is_finished() {
        warm_up_task.abort();
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
