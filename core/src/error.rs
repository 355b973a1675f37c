//! Operation error types shared across the core

use thiserror::Error;

use crate::infrastructure::{blob::BlobError, llm::LlmError};

/// Errors surfaced by core operations
#[derive(Error, Debug)]
pub enum OpError {
    /// Row does not exist or is not owned by the caller
    #[error("not found")]
    NotFound,

    /// Input failed validation before any mutation
    #[error("{0}")]
    Validation(String),

    /// User-supplied instructions were rejected by the guardrails
    #[error("unsafe instructions: {0}")]
    Unsafe(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Blob store error
    #[error("blob store error: {0}")]
    Blob(#[from] BlobError),

    /// LLM API error
    #[error("llm error: {0}")]
    Llm(#[from] LlmError),

    /// JSON error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OpError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type for core operations
pub type OpResult<T> = std::result::Result<T, OpError>;
