//! Configuration resolution for spoofify
//!
//! **Priority:** command line → environment → TOML file → compiled default
//!
//! Command line and environment are handled together by clap (`env = ...`);
//! the TOML file comes from [`spoofify_common::config`].

use clap::Parser;
use spoofify_common::config::TomlConfig;
use spoofify_common::{Error, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::services::genre_client::DEFAULT_GENRE_URL;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Command-line arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "spoofify")]
#[command(about = "Invents fictional bands for random genres using a local language model")]
#[command(version)]
pub struct Args {
    /// Path to config.toml
    #[arg(short, long, env = "SPOOFIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the language model server
    #[arg(long, env = "SPOOFIFY_LLAMA_URL")]
    pub llama_url: Option<String>,

    /// Genre source endpoint
    #[arg(long, env = "SPOOFIFY_GENRE_URL")]
    pub genre_url: Option<String>,

    /// Address to listen on
    #[arg(short, long, env = "SPOOFIFY_BIND_ADDR")]
    pub bind_addr: Option<String>,

    /// Serve `/` as model-rendered HTML (true) or JSON (false)
    #[arg(long, env = "SPOOFIFY_RENDER_HTML")]
    pub render_html: Option<bool>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub llama_url: String,
    pub genre_url: String,
    pub bind_addr: SocketAddr,
    pub render_html: bool,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge arguments over the TOML file and fill in defaults
    pub fn resolve(args: &Args, toml_config: &TomlConfig) -> Result<Self> {
        let llama_url = resolve_llama_url(args, toml_config)?;

        let genre_url = args
            .genre_url
            .clone()
            .or_else(|| toml_config.genre_url.clone())
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_GENRE_URL.to_string());

        let bind_addr = args
            .bind_addr
            .as_deref()
            .or(toml_config.bind_addr.as_deref())
            .unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address {:?}: {}", bind_addr, e)))?;

        let render_html = args.render_html.or(toml_config.render_html).unwrap_or(true);

        let log_level = toml_config.log_level();

        Ok(Self {
            llama_url,
            genre_url,
            bind_addr,
            render_html,
            log_level,
        })
    }
}

/// Resolve the model server base URL
///
/// There is no default: the model server location must be supplied.
fn resolve_llama_url(args: &Args, toml_config: &TomlConfig) -> Result<String> {
    let arg_url = args.llama_url.as_deref().filter(|url| is_valid_url(url));
    let toml_url = toml_config.llama_url.as_deref().filter(|url| is_valid_url(url));

    if arg_url.is_some() && toml_url.is_some() {
        warn!(
            "Model URL set both on the command line/environment and in TOML. \
             Using command line/environment."
        );
    }

    if let Some(url) = arg_url {
        info!("Model URL loaded from command line/environment");
        return Ok(normalize_url(url));
    }

    if let Some(url) = toml_url {
        info!("Model URL loaded from TOML config");
        return Ok(normalize_url(url));
    }

    Err(Error::Config(
        "Language model URL not configured. Please configure using one of:\n\
         1. Command line: --llama-url http://localhost:11434\n\
         2. Environment: SPOOFIFY_LLAMA_URL=http://localhost:11434\n\
         3. TOML config: ~/.config/spoofify/config.toml (llama_url = \"http://localhost:11434\")"
            .to_string(),
    ))
}

fn is_valid_url(url: &str) -> bool {
    !url.trim().is_empty()
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
