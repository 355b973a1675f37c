//! Whiteboard CRUD
//!
//! Whiteboards mirror notes: a title plus a blob holding the JSON drawing
//! state. Content goes to the blob store before the row is created.

use crate::error::{OpError, OpResult};
use crate::infrastructure::database::entities::{whiteboard, WhiteboardActive};
use crate::operations::folders::get_folder;
use crate::operations::{delete_blob_best_effort, require_non_blank};
use crate::Core;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

/// Whiteboard creation arguments
#[derive(Debug, Deserialize)]
pub struct CreateWhiteboardInput {
    pub folder_id: Uuid,
    pub title: String,
    /// Full JSON drawing state
    pub content: serde_json::Value,
}

/// Whiteboard update arguments; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateWhiteboardInput {
    pub title: Option<String>,
    pub content: Option<serde_json::Value>,
}

fn blob_key(user_uuid: Uuid, folder_uuid: Uuid, board_uuid: Uuid) -> String {
    format!("whiteboard/{}/{}/{}", user_uuid, folder_uuid, board_uuid)
}

/// Look up a whiteboard by uuid, scoped to its owner
pub async fn get_whiteboard(
    core: &Core,
    user_id: i32,
    board_uuid: Uuid,
) -> OpResult<whiteboard::Model> {
    whiteboard::Entity::find()
        .filter(whiteboard::Column::Uuid.eq(board_uuid))
        .filter(whiteboard::Column::UserId.eq(user_id))
        .one(core.db.conn())
        .await?
        .ok_or(OpError::NotFound)
}

/// List the whiteboards directly contained in a folder
pub async fn list_whiteboards(
    core: &Core,
    user_id: i32,
    folder_uuid: Uuid,
) -> OpResult<Vec<whiteboard::Model>> {
    let folder = get_folder(core, user_id, folder_uuid).await?;
    Ok(whiteboard::Entity::find()
        .filter(whiteboard::Column::UserId.eq(user_id))
        .filter(whiteboard::Column::FolderId.eq(folder.id))
        .order_by_asc(whiteboard::Column::Title)
        .all(core.db.conn())
        .await?)
}

/// Create a whiteboard: content blob first, row second
pub async fn create_whiteboard(
    core: &Core,
    user_id: i32,
    user_uuid: Uuid,
    input: CreateWhiteboardInput,
) -> OpResult<whiteboard::Model> {
    let title = require_non_blank(&input.title, "whiteboard title")?;
    let folder = get_folder(core, user_id, input.folder_id).await?;

    let board_uuid = Uuid::new_v4();
    let key = blob_key(user_uuid, folder.uuid, board_uuid);
    let bytes = serde_json::to_vec(&input.content)?;
    core.blob.put(&key, &bytes).await?;

    let now = Utc::now();
    let active = WhiteboardActive {
        uuid: Set(board_uuid),
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

/// Update a whiteboard's title and/or content
pub async fn update_whiteboard(
    core: &Core,
    user_id: i32,
    board_uuid: Uuid,
    input: UpdateWhiteboardInput,
) -> OpResult<whiteboard::Model> {
    let found = get_whiteboard(core, user_id, board_uuid).await?;

    // Validate everything before the blob write; a rejected update must
    // leave the stored content untouched
    let title = match &input.title {
        Some(title) => Some(require_non_blank(title, "whiteboard title")?),
        None => None,
    };

    if let Some(content) = &input.content {
        let bytes = serde_json::to_vec(content)?;
        core.blob.put(&found.blob_key, &bytes).await?;
    }

    let mut active: WhiteboardActive = found.into();
    if let Some(title) = title {
        active.title = Set(title);
    }
    active.updated_at = Set(Utc::now());
    Ok(active.update(core.db.conn()).await?)
}

/// Fetch a whiteboard's content payload
pub async fn whiteboard_content(
    core: &Core,
    user_id: i32,
    board_uuid: Uuid,
) -> OpResult<Vec<u8>> {
    let found = get_whiteboard(core, user_id, board_uuid).await?;
    Ok(core.blob.get(&found.blob_key).await?)
}

/// Delete a whiteboard: blob best-effort first, then the row
pub async fn delete_whiteboard(core: &Core, user_id: i32, board_uuid: Uuid) -> OpResult<()> {
    let found = get_whiteboard(core, user_id, board_uuid).await?;
    delete_blob_best_effort(core, &found.blob_key).await;
    whiteboard::Entity::delete_by_id(found.id)
        .exec(core.db.conn())
        .await?;
    Ok(())
}
