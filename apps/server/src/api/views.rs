//! Response shapes
//!
//! Rows are exposed through views keyed by uuid; internal integer ids never
//! leave the process. Content-bearing entities carry a time-limited signed
//! read URL instead of the payload itself.

use chrono::{DateTime, Utc};
use serde::Serialize;
use studydeck_core::infrastructure::database::entities::{
    file, flashcard, flashcard_group, folder, note, whiteboard,
};
use studydeck_core::Core;
use uuid::Uuid;

#[derive(Serialize)]
pub struct FolderView {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<folder::Model> for FolderView {
    fn from(m: folder::Model) -> Self {
        Self {
            id: m.uuid,
            name: m.name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct NoteView {
    pub id: Uuid,
    pub title: String,
    pub content_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteView {
    pub fn new(core: &Core, m: note::Model) -> Self {
        Self {
            id: m.uuid,
            title: m.title,
            content_url: core.signer.signed_url(&m.blob_key),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct WhiteboardView {
    pub id: Uuid,
    pub title: String,
    pub content_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WhiteboardView {
    pub fn new(core: &Core, m: whiteboard::Model) -> Self {
        Self {
            id: m.uuid,
            title: m.title,
            content_url: core.signer.signed_url(&m.blob_key),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct FileView {
    pub id: Uuid,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileView {
    pub fn new(core: &Core, m: file::Model) -> Self {
        Self {
            id: m.uuid,
            file_name: m.file_name,
            mime_type: m.mime_type,
            size_bytes: m.size_bytes,
            url: core.signer.signed_url(&m.blob_key),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct FlashcardGroupView {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<flashcard_group::Model> for FlashcardGroupView {
    fn from(m: flashcard_group::Model) -> Self {
        Self {
            id: m.uuid,
            name: m.name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct FlashcardView {
    pub id: Uuid,
    pub term: String,
    pub explanation: String,
    pub position: i32,
}

impl From<flashcard::Model> for FlashcardView {
    fn from(m: flashcard::Model) -> Self {
        Self {
            id: m.uuid,
            term: m.term,
            explanation: m.explanation,
            position: m.position,
        }
    }
}

#[derive(Serialize)]
pub struct GroupWithCardsView {
    #[serde(flatten)]
    pub group: FlashcardGroupView,
    pub flashcards: Vec<FlashcardView>,
}
