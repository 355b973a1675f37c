//! Note CRUD
//!
//! Note content (a JSON sketch document) lives in the blob store; the row
//! carries the key. Content is written to the blob before the row exists,
//! and a blob failure during creation aborts with nothing persisted.

use crate::error::{OpError, OpResult};
use crate::infrastructure::database::entities::{note, NoteActive};
use crate::operations::folders::get_folder;
use crate::operations::{delete_blob_best_effort, require_non_blank};
use crate::Core;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

/// Note creation arguments
#[derive(Debug, Deserialize)]
pub struct CreateNoteInput {
    pub folder_id: Uuid,
    pub title: String,
    /// Full JSON document state
    pub content: serde_json::Value,
}

/// Note update arguments; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateNoteInput {
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
}

fn blob_key(user_uuid: Uuid, folder_uuid: Uuid, note_uuid: Uuid) -> String {
    format!("note/{}/{}/{}", user_uuid, folder_uuid, note_uuid)
}

/// Look up a note by uuid, scoped to its owner
pub async fn get_note(core: &Core, user_id: i32, note_uuid: Uuid) -> OpResult<note::Model> {
    note::Entity::find()
        .filter(note::Column::Uuid.eq(note_uuid))
        .filter(note::Column::UserId.eq(user_id))
        .one(core.db.conn())
        .await?
        .ok_or(OpError::NotFound)
}

/// List the notes directly contained in a folder
pub async fn list_notes(
    core: &Core,
    user_id: i32,
    folder_uuid: Uuid,
) -> OpResult<Vec<note::Model>> {
    let folder = get_folder(core, user_id, folder_uuid).await?;
    Ok(note::Entity::find()
        .filter(note::Column::UserId.eq(user_id))
        .filter(note::Column::FolderId.eq(folder.id))
        .order_by_asc(note::Column::Title)
        .all(core.db.conn())
        .await?)
}

/// Create a note: content blob first, row second
pub async fn create_note(
    core: &Core,
    user_id: i32,
    user_uuid: Uuid,
    input: CreateNoteInput,
) -> OpResult<note::Model> {
    let title = require_non_blank(&input.title, "note title")?;
    let folder = get_folder(core, user_id, input.folder_id).await?;

    let note_uuid = Uuid::new_v4();
    let key = blob_key(user_uuid, folder.uuid, note_uuid);
    let bytes = serde_json::to_vec(&input.content)?;
    core.blob.put(&key, &bytes).await?;

    let now = Utc::now();
    let active = NoteActive {
        uuid: Set(note_uuid),
        user_id: Set(user_id),
        folder_id: Set(folder.id),
        title: Set(title),
        blob_key: Set(key),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(active.insert(core.db.conn()).await?)
}

/// Update a note's title and/or content; content overwrites the blob
pub async fn update_note(
    core: &Core,
    user_id: i32,
    note_uuid: Uuid,
    input: UpdateNoteInput,
) -> OpResult<note::Model> {
    let found = get_note(core, user_id, note_uuid).await?;

    // Validate everything before the blob write; a rejected update must
    // leave the stored content untouched
    let title = match &input.title {
        Some(title) => Some(require_non_blank(title, "note title")?),
        None => None,
    };

    if let Some(content) = &input.content {
        let bytes = serde_json::to_vec(content)?;
        core.blob.put(&found.blob_key, &bytes).await?;
    }

    let mut active: NoteActive = found.into();
    if let Some(title) = title {
        active.title = Set(title);
    }
    active.updated_at = Set(Utc::now());
    Ok(active.update(core.db.conn()).await?)
}

/// Fetch a note's content payload
pub async fn note_content(core: &Core, user_id: i32, note_uuid: Uuid) -> OpResult<Vec<u8>> {
    let found = get_note(core, user_id, note_uuid).await?;
    Ok(core.blob.get(&found.blob_key).await?)
}

/// Delete a note: blob best-effort first, then the row
pub async fn delete_note(core: &Core, user_id: i32, note_uuid: Uuid) -> OpResult<()> {
    let found = get_note(core, user_id, note_uuid).await?;
    delete_blob_best_effort(core, &found.blob_key).await;
    note::Entity::delete_by_id(found.id)
        .exec(core.db.conn())
        .await?;
    Ok(())
}
