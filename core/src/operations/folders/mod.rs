//! Folder CRUD and the deletion cascade

mod delete;

pub use delete::delete_folder;

use crate::error::{OpError, OpResult};
use crate::infrastructure::database::entities::{folder, FolderActive};
use crate::operations::require_non_blank;
use crate::Core;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

/// Folder creation arguments
#[derive(Debug, Deserialize)]
pub struct CreateFolderInput {
    pub name: String,
    /// Parent folder uuid; `None` creates a root folder
    pub parent_id: Option<Uuid>,
}

/// Look up a folder by uuid, scoped to its owner
pub async fn get_folder(core: &Core, user_id: i32, folder_uuid: Uuid) -> OpResult<folder::Model> {
    folder::Entity::find()
        .filter(folder::Column::Uuid.eq(folder_uuid))
        .filter(folder::Column::UserId.eq(user_id))
        .one(core.db.conn())
        .await?
        .ok_or(OpError::NotFound)
}

/// List folders, optionally restricted to one parent (None lists roots)
pub async fn list_folders(
    core: &Core,
    user_id: i32,
    parent: Option<Uuid>,
) -> OpResult<Vec<folder::Model>> {
    let mut query = folder::Entity::find().filter(folder::Column::UserId.eq(user_id));

    query = match parent {
        Some(parent_uuid) => {
            let parent = get_folder(core, user_id, parent_uuid).await?;
            query.filter(folder::Column::ParentId.eq(parent.id))
        }
        None => query.filter(folder::Column::ParentId.is_null()),
    };

    Ok(query
        .order_by_asc(folder::Column::Name)
        .all(core.db.conn())
        .await?)
}

/// Create a folder; the parent, when given, must exist and belong to the
/// same user
pub async fn create_folder(
    core: &Core,
    user_id: i32,
    input: CreateFolderInput,
) -> OpResult<folder::Model> {
    let name = require_non_blank(&input.name, "folder name")?;

    let parent_id = match input.parent_id {
        Some(parent_uuid) => Some(get_folder(core, user_id, parent_uuid).await?.id),
        None => None,
    };

    let now = Utc::now();
    let active = FolderActive {
        uuid: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        parent_id: Set(parent_id),
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(active.insert(core.db.conn()).await?)
}

/// Rename a folder
pub async fn rename_folder(
    core: &Core,
    user_id: i32,
    folder_uuid: Uuid,
    new_name: &str,
) -> OpResult<folder::Model> {
    let name = require_non_blank(new_name, "folder name")?;
    let found = get_folder(core, user_id, folder_uuid).await?;

    let mut active: FolderActive = found.into();
    active.name = Set(name);
    active.updated_at = Set(Utc::now());
    Ok(active.update(core.db.conn()).await?)
}

/// Direct child folders of a folder (by internal id)
pub(crate) async fn children_of(
    core: &Core,
    user_id: i32,
    folder_id: i32,
) -> OpResult<Vec<folder::Model>> {
    Ok(folder::Entity::find()
        .filter(folder::Column::UserId.eq(user_id))
        .filter(folder::Column::ParentId.eq(folder_id))
        .all(core.db.conn())
        .await?)
}
