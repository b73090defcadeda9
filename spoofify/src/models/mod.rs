//! Data models

pub mod band_info;
pub mod prompt;

pub use band_info::{BandInfo, BandInfoError};
pub use prompt::{build_payload, PromptPayload};
