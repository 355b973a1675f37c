//! Application configuration

use super::{default_data_dir, Migrate};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config schema version
    pub version: u32,

    /// Data directory path
    pub data_dir: PathBuf,

    /// Logging level
    pub log_level: String,

    /// HTTP listen port
    pub port: u16,

    /// Secret used to MAC session tokens
    pub auth_secret: String,

    /// Blob store configuration
    pub blob: BlobConfig,

    /// LLM API configuration
    pub llm: LlmConfig,

    /// Request and generation limits
    pub limits: LimitsConfig,
}

/// Blob store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobConfig {
    /// Secret used to sign time-limited read URLs
    pub url_secret: String,

    /// Lifetime of a signed read URL, in seconds
    pub url_ttl_secs: u64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            url_secret: "dev-blob-secret".to_string(),
            url_ttl_secs: 3600,
        }
    }
}

/// LLM API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible chat completions API
    pub api_base: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Model used for flashcard generation
    pub generation_model: String,

    /// Vision-capable model used to describe images
    pub vision_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key_env: "STUDYDECK_LLM_API_KEY".to_string(),
            generation_model: "gpt-4o-mini".to_string(),
            vision_model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Request and generation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum size of a single uploaded file, in bytes
    pub max_upload_bytes: u64,

    /// Maximum cumulative size of files referenced by one generation request
    pub max_source_bytes: u64,

    /// Hard truncation limit applied to each extracted file
    pub max_extract_bytes_per_file: usize,

    /// Minimum flashcards a generation must produce
    pub min_flashcards: u32,

    /// Maximum flashcards a generation may request
    pub max_flashcards: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 50 * 1024 * 1024,
            max_source_bytes: 50 * 1024 * 1024,
            max_extract_bytes_per_file: 512 * 1024,
            min_flashcards: 3,
            max_flashcards: 50,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let data_dir = default_data_dir()?;
        Self::load_from(&data_dir)
    }

    /// Load configuration from a specific data directory
    pub fn load_from(data_dir: &PathBuf) -> Result<Self> {
        let config_path = data_dir.join("studydeck.json");

        if config_path.exists() {
            info!("Loading config from {:?}", config_path);
            let json = fs::read_to_string(&config_path)?;
            let mut config: AppConfig = serde_json::from_str(&json)?;

            // Apply migrations if needed
            if config.version < Self::target_version() {
                info!(
                    "Migrating config from v{} to v{}",
                    config.version,
                    Self::target_version()
                );
                config.migrate()?;
                config.save()?;
            }

            Ok(config)
        } else {
            warn!("No config found, creating default at {:?}", config_path);
            let config = Self::default_with_dir(data_dir.clone());
            config.save()?;
            Ok(config)
        }
    }

    /// Create default configuration with specific data directory
    pub fn default_with_dir(data_dir: PathBuf) -> Self {
        Self {
            version: Self::target_version(),
            data_dir,
            log_level: "info".to_string(),
            port: 8080,
            auth_secret: "dev-auth-secret".to_string(),
            blob: BlobConfig::default(),
            llm: LlmConfig::default(),
            limits: LimitsConfig::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        let config_path = self.data_dir.join("studydeck.json");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;
        info!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Get the path of the sqlite database file
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("studydeck.db")
    }

    /// Get the root directory of the blob store
    pub fn blobs_dir(&self) -> PathBuf {
        self.data_dir.join("blobs")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(self.blobs_dir())?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::default_with_dir(data_dir)
    }
}

impl Migrate for AppConfig {
    fn current_version(&self) -> u32 {
        self.version
    }

    fn target_version() -> u32 {
        1
    }

    fn migrate(&mut self) -> Result<()> {
        match self.version {
            0 => {
                self.version = 1;
                Ok(())
            }
            1 => Ok(()),
            v => Err(anyhow!("Unknown config version: {}", v)),
        }
    }
}
