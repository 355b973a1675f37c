//! Uploaded file endpoints
//!
//! Upload is a multipart form: a `folder_id` field plus one `file` part.
//! The router applies the configured body limit before the handler runs.

use super::auth::AuthUser;
use super::error::{ApiError, ApiResult};
use super::views::FileView;
use super::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use studydeck_core::operations::files;
use studydeck_core::OpError;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListQuery {
    folder_id: Uuid,
}

#[derive(Deserialize)]
pub struct RenameBody {
    file_name: String,
}

pub async fn list(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<FileView>>> {
    let rows = files::list_files(&core, user.id, query.folder_id).await?;
    Ok(Json(
        rows.into_iter().map(|m| FileView::new(&core, m)).collect(),
    ))
}

pub async fn upload(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<FileView>)> {
    let mut folder_id: Option<Uuid> = None;
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Op(OpError::validation(format!("malformed multipart: {}", e))))?
    {
        match field.name() {
            Some("folder_id") => {
                let value = field.text().await.map_err(|e| {
                    ApiError::Op(OpError::validation(format!("malformed folder_id: {}", e)))
                })?;
                folder_id = Some(value.parse().map_err(|_| {
                    ApiError::Op(OpError::validation("folder_id is not a valid uuid"))
                })?);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("file").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::Op(OpError::validation(format!("upload failed: {}", e)))
                })?;
                upload = Some((file_name, mime_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let folder_id = folder_id
        .ok_or_else(|| ApiError::Op(OpError::validation("folder_id field is required")))?;
    let (file_name, mime_type, bytes) =
        upload.ok_or_else(|| ApiError::Op(OpError::validation("file field is required")))?;

    let row = files::upload_file(
        &core,
        user.id,
        user.uuid,
        files::UploadFileInput {
            folder_id,
            file_name,
            mime_type,
            bytes,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(FileView::new(&core, row))))
}

pub async fn get_one(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<FileView>> {
    let row = files::get_file(&core, user.id, id).await?;
    Ok(Json(FileView::new(&core, row)))
}

pub async fn rename(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RenameBody>,
) -> ApiResult<Json<FileView>> {
    let row = files::rename_file(&core, user.id, id, &body.file_name).await?;
    Ok(Json(FileView::new(&core, row)))
}

pub async fn delete(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    files::delete_file(&core, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
