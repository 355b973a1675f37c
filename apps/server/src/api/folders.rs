//! Folder endpoints

use super::auth::AuthUser;
use super::error::ApiResult;
use super::views::FolderView;
use super::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use studydeck_core::operations::folders;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListQuery {
    parent_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct RenameBody {
    name: String,
}

pub async fn list(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<FolderView>>> {
    let rows = folders::list_folders(&core, user.id, query.parent_id).await?;
    Ok(Json(rows.into_iter().map(FolderView::from).collect()))
}

pub async fn create(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<folders::CreateFolderInput>,
) -> ApiResult<(StatusCode, Json<FolderView>)> {
    let row = folders::create_folder(&core, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_one(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<FolderView>> {
    let row = folders::get_folder(&core, user.id, id).await?;
    Ok(Json(row.into()))
}

pub async fn rename(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RenameBody>,
) -> ApiResult<Json<FolderView>> {
    let row = folders::rename_folder(&core, user.id, id, &body.name).await?;
    Ok(Json(row.into()))
}

pub async fn delete(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    folders::delete_folder(&core, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
