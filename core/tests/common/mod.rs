//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use studydeck_core::config::AppConfig;
use studydeck_core::infrastructure::blob::FsBlobStore;
use studydeck_core::infrastructure::database::entities::user;
use studydeck_core::infrastructure::database::Database;
use studydeck_core::infrastructure::llm::{
    FlashcardDraft, GenerationRequest, LlmClient, LlmResult,
};
use studydeck_core::operations::users::{self, WebhookUser};
use studydeck_core::Core;

/// LLM stub returning canned drafts; counts every API call so tests can
/// assert that validation failures never reach the model
pub struct MockLlm {
    drafts: Mutex<Vec<FlashcardDraft>>,
    calls: AtomicUsize,
}

impl MockLlm {
    pub fn returning(drafts: Vec<FlashcardDraft>) -> Arc<Self> {
        Arc::new(Self {
            drafts: Mutex::new(drafts),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn generate_flashcards(
        &self,
        _request: &GenerationRequest,
    ) -> LlmResult<Vec<FlashcardDraft>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.drafts.lock().unwrap().clone())
    }

    async fn describe_image(&self, _bytes: &[u8], _mime_type: &str) -> LlmResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("a diagram".to_string())
    }
}

pub fn drafts(n: usize) -> Vec<FlashcardDraft> {
    (0..n)
        .map(|i| FlashcardDraft {
            term: format!("term {}", i),
            explanation: format!("explanation {}", i),
        })
        .collect()
}

/// Core over an in-memory database and a tempdir-backed blob store
pub async fn test_core(data_dir: &Path, llm: Arc<MockLlm>) -> Core {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let config = AppConfig::default_with_dir(data_dir.to_path_buf());
    let db = Database::connect_memory().await.unwrap();
    db.migrate().await.unwrap();
    let blob = Arc::new(FsBlobStore::new(config.blobs_dir()).unwrap());
    Core::from_parts(config, db, blob, llm)
}

pub async fn seed_user(core: &Core, external_id: &str) -> user::Model {
    users::upsert_from_webhook(
        core,
        WebhookUser {
            external_id: external_id.to_string(),
            email: format!("{}@example.com", external_id),
            name: "Test User".to_string(),
        },
    )
    .await
    .unwrap()
}
