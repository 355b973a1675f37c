//! Content extraction pipeline
//!
//! Converts referenced notes, whiteboards and uploaded files into plain
//! text for flashcard generation. Extraction is dispatched on the source
//! kind and, for files, on the declared MIME type / filename extension.
//! A failure while extracting one item degrades that item to a
//! filename-only placeholder instead of aborting the batch.

mod extractors;

use crate::error::{OpError, OpResult};
use crate::operations::{files, notes, whiteboards};
use crate::Core;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Kind of a generation source item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Note,
    Whiteboard,
    File,
}

/// One `{type, id}` reference in a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceItem {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub id: Uuid,
}

/// Extracted text for one source item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Human-readable label (title or filename)
    pub label: String,
    pub text: String,
}

/// Cumulative byte size of the files referenced by the items
///
/// Notes and whiteboards are small JSON documents and do not count toward
/// the cap.
pub async fn referenced_file_bytes(
    core: &Core,
    user_id: i32,
    items: &[SourceItem],
) -> OpResult<u64> {
    let mut total: u64 = 0;
    for item in items {
        if item.kind == SourceKind::File {
            let file = files::get_file(core, user_id, item.id).await?;
            total += file.size_bytes.max(0) as u64;
        }
    }
    Ok(total)
}

/// Extract text from every item, degrading per-item failures to a
/// placeholder
pub async fn extract_items(
    core: &Core,
    user_id: i32,
    items: &[SourceItem],
) -> OpResult<Vec<ExtractedItem>> {
    let mut extracted = Vec::with_capacity(items.len());
    for item in items {
        extracted.push(extract_item(core, user_id, item).await?);
    }
    Ok(extracted)
}

async fn extract_item(core: &Core, user_id: i32, item: &SourceItem) -> OpResult<ExtractedItem> {
    match item.kind {
        SourceKind::Note => {
            let note = notes::get_note(core, user_id, item.id).await?;
            let text = match core.blob.get(&note.blob_key).await {
                Ok(bytes) => extractors::text_from_document_json(&bytes),
                Err(e) => {
                    warn!("Extraction failed for note {} ({}), degrading", item.id, e);
                    placeholder(&note.title)
                }
            };
            Ok(ExtractedItem {
                label: note.title,
                text,
            })
        }
        SourceKind::Whiteboard => {
            let board = whiteboards::get_whiteboard(core, user_id, item.id).await?;
            let text = match core.blob.get(&board.blob_key).await {
                Ok(bytes) => extractors::text_from_document_json(&bytes),
                Err(e) => {
                    warn!(
                        "Extraction failed for whiteboard {} ({}), degrading",
                        item.id, e
                    );
                    placeholder(&board.title)
                }
            };
            Ok(ExtractedItem {
                label: board.title,
                text,
            })
        }
        SourceKind::File => {
            let file = files::get_file(core, user_id, item.id).await?;
            let limit = core.config.limits.max_extract_bytes_per_file;
            let text = match core.blob.get(&file.blob_key).await {
                Ok(bytes) => {
                    match extractors::text_from_file(
                        core,
                        &file.file_name,
                        &file.mime_type,
                        bytes,
                        limit,
                    )
                    .await
                    {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(
                                "Extraction failed for file {} ({}), degrading",
                                file.file_name, e
                            );
                            placeholder(&file.file_name)
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        "Blob read failed for file {} ({}), degrading",
                        file.file_name, e
                    );
                    placeholder(&file.file_name)
                }
            };
            Ok(ExtractedItem {
                label: file.file_name,
                text,
            })
        }
    }
}

/// Fallback text when an item cannot be extracted
fn placeholder(name: &str) -> String {
    format!("[file: {}]", name)
}

/// Join extracted items into one generation source text
pub fn aggregate(items: &[ExtractedItem]) -> String {
    let mut out = String::new();
    for item in items {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&format!("## {}\n{}", item.label, item.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_with_labels() {
        let items = vec![
            ExtractedItem {
                label: "Biology".to_string(),
                text: "mitochondria".to_string(),
            },
            ExtractedItem {
                label: "notes.pdf".to_string(),
                text: "osmosis".to_string(),
            },
        ];
        let joined = aggregate(&items);
        assert!(joined.contains("## Biology\nmitochondria"));
        assert!(joined.contains("## notes.pdf\nosmosis"));
    }
}
