//! # Spoofify Common Library
//!
//! Shared code for the Spoofify service:
//! - Common error and result types
//! - TOML configuration file model and loading
//! - Configuration file path resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
