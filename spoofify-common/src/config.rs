//! Configuration file loading and path resolution
//!
//! The TOML file is the lowest-priority explicit configuration tier. Command-line
//! flags and environment variables are layered on top of it by the service.
//!
//! File location priority:
//! 1. Explicit path (`--config` / `SPOOFIFY_CONFIG`)
//! 2. User config directory (`~/.config/spoofify/config.toml` on Linux)
//! 3. System-wide `/etc/spoofify/config.toml` (Linux only)
//!
//! A missing file is never fatal. A malformed file is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "spoofify";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default log level when neither RUST_LOG nor the TOML file sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level applied to the service and HTTP layers (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Contents of `config.toml`
///
/// Every key is optional so a partial file only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Base URL of the language model server (e.g. `http://localhost:11434`)
    pub llama_url: Option<String>,
    /// Genre source endpoint
    pub genre_url: Option<String>,
    /// Address the HTTP server binds to
    pub bind_addr: Option<String>,
    /// Serve `/` as model-rendered HTML instead of JSON
    pub render_html: Option<bool>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Normalized log level, falling back to the default when blank
    pub fn log_level(&self) -> String {
        let level = self.logging.level.trim();
        if level.is_empty() {
            DEFAULT_LOG_LEVEL.to_string()
        } else {
            level.to_lowercase()
        }
    }
}

/// Platform default location of the user config file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Find the config file to load, if any
///
/// An explicit path is returned as-is even when it does not exist, so that
/// the caller can report it.
pub fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(path) = user_config_path() {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This path was requested but does not exist; defaults were used
    Missing(PathBuf),
    /// No file was requested or found in the standard locations
    Defaults,
}

impl ConfigSource {
    /// Log the outcome of config loading
    ///
    /// Called by the service once its tracing subscriber is installed.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config file: {}", path.display()),
            ConfigSource::Missing(path) => {
                warn!("Config file {} not found, using defaults", path.display())
            }
            ConfigSource::Defaults => info!("No config file found, using defaults"),
        }
    }
}

/// Load the config file if one can be found, falling back to defaults
///
/// Missing files yield `TomlConfig::default()` together with
/// [`ConfigSource::Missing`] so the caller can warn about them. Files that
/// exist but fail to parse are reported as [`Error::Config`].
pub fn load_or_default(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let Some(path) = locate_config_file(explicit) else {
        return Ok((TomlConfig::default(), ConfigSource::Defaults));
    };

    if !path.exists() {
        return Ok((TomlConfig::default(), ConfigSource::Missing(path)));
    }

    match load_toml_config(&path) {
        Ok(config) => Ok((config, ConfigSource::File(path))),
        Err(e) => Err(Error::Config(format!(
            "Failed to load {}: {}",
            path.display(),
            e
        ))),
    }
}
