//! LLM API infrastructure
//!
//! One trait seam for the two model calls the core makes: structured
//! flashcard generation and image description. There is deliberately no
//! retry or backoff; an upstream failure surfaces to the caller.

mod http_client;

pub use http_client::HttpLlmClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// LLM API errors
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport or HTTP-level failure
    #[error("llm request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("llm api returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body did not decode into the expected shape
    #[error("malformed llm response: {0}")]
    MalformedResponse(String),
}

pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// A single generated term/explanation pair, before persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardDraft {
    pub term: String,
    pub explanation: String,
}

/// Inputs for one structured generation call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Aggregated source text extracted from the selected items
    pub source_text: String,
    /// Desired number of flashcards
    pub count: u32,
    /// Optional user-supplied instructions, already guardrail-checked
    pub instructions: Option<String>,
}

/// Client for the external LLM API
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Produce term/explanation pairs from aggregated source text.
    /// Exactly one API call, structured JSON output.
    async fn generate_flashcards(&self, request: &GenerationRequest)
        -> LlmResult<Vec<FlashcardDraft>>;

    /// Describe image bytes with a vision-capable model
    async fn describe_image(&self, bytes: &[u8], mime_type: &str) -> LlmResult<String>;
}
