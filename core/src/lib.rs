//! Studydeck Core
//!
//! Domain, persistence and operations for the study-management backend:
//! folders containing notes, whiteboards, uploaded files and AI-generated
//! flashcard sets. The HTTP surface lives in `apps/server`.

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod operations;

pub use error::{OpError, OpResult};

use crate::config::AppConfig;
use crate::infrastructure::{
    blob::{BlobStore, FsBlobStore, UrlSigner},
    database::Database,
    llm::{HttpLlmClient, LlmClient},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Explicitly constructed application core
///
/// Owns the database connection, blob store, URL signer and LLM client.
/// Built once at process start and shared behind an `Arc`; there are no
/// ambient module-level clients.
pub struct Core {
    pub config: AppConfig,
    pub db: Database,
    pub blob: Arc<dyn BlobStore>,
    pub signer: UrlSigner,
    pub llm: Arc<dyn LlmClient>,
}

impl Core {
    /// Open (or create) the core from configuration
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.ensure_directories()?;

        let db = Database::open_or_create(&config.database_path()).await?;
        db.migrate().await?;

        let blob = Arc::new(FsBlobStore::new(config.blobs_dir())?);
        let signer = UrlSigner::new(
            &config.blob.url_secret,
            Duration::from_secs(config.blob.url_ttl_secs),
        );
        let llm = Arc::new(HttpLlmClient::from_config(&config.llm));

        info!("Core initialized (data dir {:?})", config.data_dir);

        Ok(Self {
            config,
            db,
            blob,
            signer,
            llm,
        })
    }

    /// Assemble a core from already-built parts (tests inject mocks here)
    pub fn from_parts(
        config: AppConfig,
        db: Database,
        blob: Arc<dyn BlobStore>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        let signer = UrlSigner::new(
            &config.blob.url_secret,
            Duration::from_secs(config.blob.url_ttl_secs),
        );
        Self {
            config,
            db,
            blob,
            signer,
            llm,
        }
    }
}
