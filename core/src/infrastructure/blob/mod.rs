//! Blob store infrastructure
//!
//! Key-addressed storage for opaque byte payloads. Large content (note and
//! whiteboard JSON, uploaded files, generation records) never touches the
//! relational store; rows only carry blob keys. Reads go through
//! time-limited signed URLs.

mod fs_store;
mod signer;

pub use fs_store::FsBlobStore;
pub use signer::UrlSigner;

use async_trait::async_trait;
use thiserror::Error;

/// Blob store errors
#[derive(Error, Debug)]
pub enum BlobError {
    /// Key contains path traversal or other rejected components
    #[error("invalid blob key: {0}")]
    InvalidKey(String),

    /// Blob does not exist
    #[error("blob not found: {0}")]
    NotFound(String),

    /// Underlying store failure
    #[error("blob io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BlobResult<T> = std::result::Result<T, BlobError>;

/// Key-addressed storage for arbitrary byte payloads
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a payload under the given key, overwriting any existing blob
    async fn put(&self, key: &str, bytes: &[u8]) -> BlobResult<()>;

    /// Fetch the payload stored under the given key
    async fn get(&self, key: &str) -> BlobResult<Vec<u8>>;

    /// Delete the payload under the given key. Deleting a missing key is a
    /// no-op, so deletes are idempotent.
    async fn delete(&self, key: &str) -> BlobResult<()>;
}

/// Validate and normalize a blob key
///
/// Keys are forward-slash separated relative paths. Empty segments, `.`,
/// `..`, backslashes and NUL bytes are rejected.
pub fn validate_key(key: &str) -> BlobResult<()> {
    if key.is_empty() || key.len() > 1024 {
        return Err(BlobError::InvalidKey(key.to_string()));
    }
    if key.contains('\\') || key.contains('\0') {
        return Err(BlobError::InvalidKey(key.to_string()));
    }
    for segment in key.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(BlobError::InvalidKey(key.to_string()));
        }
    }
    Ok(())
}

/// Sanitize a user-supplied filename for use inside a blob key
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    let trimmed = cleaned.trim_matches(['.', '_']).to_string();
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_traversal_keys() {
        assert!(validate_key("notes/1/2/3").is_ok());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("notes//1").is_err());
        assert!(validate_key("notes/./1").is_err());
        assert!(validate_key("").is_err());
        assert!(validate_key("a\\b").is_err());
    }

    #[test]
    fn sanitizes_file_names() {
        assert_eq!(sanitize_file_name("lecture notes.pdf"), "lecture_notes.pdf");
        assert_eq!(sanitize_file_name("../../evil"), "evil");
        assert_eq!(sanitize_file_name("???"), "file");
    }
}
