//! Uploaded file CRUD
//!
//! Uploads land in the blob store under
//! `files/{userId}/{folderId}/{timestamp}_{sanitizedName}`; the row records
//! the original filename, declared MIME type and byte size.

use crate::error::{OpError, OpResult};
use crate::infrastructure::blob::sanitize_file_name;
use crate::infrastructure::database::entities::{file, FileActive};
use crate::operations::folders::get_folder;
use crate::operations::{delete_blob_best_effort, require_non_blank};
use crate::Core;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

/// Upload arguments; `bytes` is the full payload (multipart-decoded by the
/// server layer)
pub struct UploadFileInput {
    pub folder_id: Uuid,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Look up a file by uuid, scoped to its owner
pub async fn get_file(core: &Core, user_id: i32, file_uuid: Uuid) -> OpResult<file::Model> {
    file::Entity::find()
        .filter(file::Column::Uuid.eq(file_uuid))
        .filter(file::Column::UserId.eq(user_id))
        .one(core.db.conn())
        .await?
        .ok_or(OpError::NotFound)
}

/// List the files directly contained in a folder
pub async fn list_files(
    core: &Core,
    user_id: i32,
    folder_uuid: Uuid,
) -> OpResult<Vec<file::Model>> {
    let folder = get_folder(core, user_id, folder_uuid).await?;
    Ok(file::Entity::find()
        .filter(file::Column::UserId.eq(user_id))
        .filter(file::Column::FolderId.eq(folder.id))
        .order_by_asc(file::Column::FileName)
        .all(core.db.conn())
        .await?)
}

/// Store an uploaded file: size check, blob write, then the row
pub async fn upload_file(
    core: &Core,
    user_id: i32,
    user_uuid: Uuid,
    input: UploadFileInput,
) -> OpResult<file::Model> {
    let file_name = require_non_blank(&input.file_name, "file name")?;

    let max = core.config.limits.max_upload_bytes;
    if input.bytes.len() as u64 > max {
        return Err(OpError::validation(format!(
            "file exceeds the {} byte upload limit",
            max
        )));
    }

    let folder = get_folder(core, user_id, input.folder_id).await?;

    let key = format!(
        "files/{}/{}/{}_{}",
        user_uuid,
        folder.uuid,
        Utc::now().timestamp_millis(),
        sanitize_file_name(&file_name)
    );
    core.blob.put(&key, &input.bytes).await?;

    let now = Utc::now();
    let active = FileActive {
        uuid: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        folder_id: Set(folder.id),
        file_name: Set(file_name),
        mime_type: Set(input.mime_type),
        size_bytes: Set(input.bytes.len() as i64),
        blob_key: Set(key),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(active.insert(core.db.conn()).await?)
}

/// Rename a file (the blob key keeps the original upload name)
pub async fn rename_file(
    core: &Core,
    user_id: i32,
    file_uuid: Uuid,
    new_name: &str,
) -> OpResult<file::Model> {
    let file_name = require_non_blank(new_name, "file name")?;
    let found = get_file(core, user_id, file_uuid).await?;

    let mut active: FileActive = found.into();
    active.file_name = Set(file_name);
    active.updated_at = Set(Utc::now());
    Ok(active.update(core.db.conn()).await?)
}

/// Fetch a file's payload
pub async fn file_content(core: &Core, user_id: i32, file_uuid: Uuid) -> OpResult<Vec<u8>> {
    let found = get_file(core, user_id, file_uuid).await?;
    Ok(core.blob.get(&found.blob_key).await?)
}

/// Delete a file: blob best-effort first, then the row
pub async fn delete_file(core: &Core, user_id: i32, file_uuid: Uuid) -> OpResult<()> {
    let found = get_file(core, user_id, file_uuid).await?;
    delete_blob_best_effort(core, &found.blob_key).await;
    file::Entity::delete_by_id(found.id)
        .exec(core.db.conn())
        .await?;
    Ok(())
}
