//! Core operations, all ownership-scoped
//!
//! Every operation takes the caller's resolved user row and filters each
//! query by that user id. A row owned by someone else surfaces as NotFound,
//! never as a distinct "forbidden".

pub mod content;
pub mod files;
pub mod flashcards;
pub mod folders;
pub mod notes;
pub mod users;
pub mod whiteboards;

/// Attempt a blob delete; failures are logged and swallowed. The orphaned
/// blob outlives its row in that case.
pub(crate) async fn delete_blob_best_effort(core: &crate::Core, blob_key: &str) {
    if let Err(e) = core.blob.delete(blob_key).await {
        tracing::warn!("Blob delete failed for {} (continuing): {}", blob_key, e);
    }
}

/// Reject empty or whitespace-only names/titles
pub(crate) fn require_non_blank(value: &str, what: &str) -> crate::OpResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::OpError::validation(format!(
            "{} must not be empty",
            what
        )));
    }
    Ok(trimmed.to_string())
}
