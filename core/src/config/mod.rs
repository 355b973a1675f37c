//! Application configuration

mod app_config;
mod migration;

pub use app_config::{AppConfig, BlobConfig, LimitsConfig, LlmConfig};
pub use migration::Migrate;

use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Resolve the default data directory for the application
pub fn default_data_dir() -> Result<PathBuf> {
    std::env::var("STUDYDECK_DATA_DIR")
        .map(PathBuf::from)
        .or_else(|_| {
            dirs_fallback().ok_or_else(|| anyhow!("Unable to determine a data directory"))
        })
}

fn dirs_fallback() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local/share/studydeck"))
}
