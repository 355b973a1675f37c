//! Format-specific text extractors

use crate::Core;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("pdf extraction failed: {0}")]
    Pdf(String),
    #[error("image description failed: {0}")]
    Vision(#[from] crate::infrastructure::llm::LlmError),
    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Collect the `text` fields of a JSON sketch/drawing document
///
/// Both notes and whiteboards store element trees where visible text lives
/// in string-valued `text` properties; everything else (geometry, styling)
/// is ignored.
pub fn text_from_document_json(bytes: &[u8]) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
        return String::new();
    };
    let mut out = Vec::new();
    collect_text_fields(&value, &mut out);
    out.join("\n")
}

fn collect_text_fields(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                if key == "text" {
                    if let Value::String(s) = inner {
                        if !s.trim().is_empty() {
                            out.push(s.trim().to_string());
                        }
                    }
                }
                collect_text_fields(inner, out);
            }
        }
        Value::Array(items) => {
            for inner in items {
                collect_text_fields(inner, out);
            }
        }
        _ => {}
    }
}

/// Extract plain text from an uploaded file, routed by MIME type and
/// filename extension, truncated to `limit` bytes
pub async fn text_from_file(
    core: &Core,
    file_name: &str,
    mime_type: &str,
    bytes: Vec<u8>,
    limit: usize,
) -> Result<String, ExtractError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let text = if is_text_like(mime_type, &extension) {
        let end = bytes.len().min(limit);
        String::from_utf8_lossy(&bytes[..end]).into_owned()
    } else if is_pdf(mime_type, &extension) {
        extract_pdf(bytes).await?
    } else if let Some(image_mime) = image_mime(mime_type, &extension) {
        // Embedded/standalone images go to the vision model
        core.llm.describe_image(&bytes, image_mime).await?
    } else {
        debug!(
            "No extractor for {} ({}), using placeholder",
            file_name, mime_type
        );
        format!("[file: {}]", file_name)
    };

    Ok(truncate_on_char_boundary(text, limit))
}

fn is_text_like(mime_type: &str, extension: &str) -> bool {
    mime_type.starts_with("text/")
        || matches!(
            mime_type,
            "application/json" | "application/xml" | "application/x-yaml"
        )
        || matches!(
            extension,
            "txt" | "md" | "markdown" | "csv" | "json" | "xml" | "yaml" | "yml" | "rs" | "py"
                | "js" | "ts" | "java" | "c" | "cpp" | "h" | "tex"
        )
}

fn is_pdf(mime_type: &str, extension: &str) -> bool {
    mime_type == "application/pdf" || extension == "pdf"
}

fn image_mime(mime_type: &str, extension: &str) -> Option<&'static str> {
    if mime_type.starts_with("image/") {
        return match mime_type {
            "image/png" => Some("image/png"),
            "image/jpeg" => Some("image/jpeg"),
            "image/webp" => Some("image/webp"),
            "image/gif" => Some("image/gif"),
            _ => None,
        };
    }
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// PDF extraction is CPU-bound, so it runs on the blocking pool
async fn extract_pdf(bytes: Vec<u8>) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
    })
    .await?
}

fn truncate_on_char_boundary(mut text: String, limit: usize) -> String {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_text_fields_from_sketch_json() {
        let doc = serde_json::json!({
            "elements": [
                { "type": "rectangle", "width": 10 },
                { "type": "text", "text": "Krebs cycle" },
                { "type": "group", "children": [ { "text": "ATP yield" } ] },
            ],
            "appState": { "text": "  " },
        });
        let bytes = serde_json::to_vec(&doc).unwrap();
        let text = text_from_document_json(&bytes);
        assert_eq!(text, "Krebs cycle\nATP yield");
    }

    #[test]
    fn invalid_json_extracts_to_empty() {
        assert_eq!(text_from_document_json(b"not json"), "");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        let s = "héllo".to_string();
        // byte 2 falls inside the two-byte 'é'
        assert_eq!(truncate_on_char_boundary(s, 2), "h");
    }

    #[test]
    fn routes_by_extension() {
        assert!(is_text_like("application/octet-stream", "md"));
        assert!(is_pdf("application/octet-stream", "pdf"));
        assert_eq!(image_mime("application/octet-stream", "jpg"), Some("image/jpeg"));
        assert_eq!(image_mime("application/octet-stream", "bin"), None);
    }
}
