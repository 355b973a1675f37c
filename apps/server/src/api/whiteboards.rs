//! Whiteboard endpoints

use super::auth::AuthUser;
use super::error::ApiResult;
use super::views::WhiteboardView;
use super::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use studydeck_core::operations::whiteboards;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListQuery {
    folder_id: Uuid,
}

pub async fn list(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<WhiteboardView>>> {
    let rows = whiteboards::list_whiteboards(&core, user.id, query.folder_id).await?;
    Ok(Json(
        rows.into_iter()
            .map(|m| WhiteboardView::new(&core, m))
            .collect(),
    ))
}

pub async fn create(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<whiteboards::CreateWhiteboardInput>,
) -> ApiResult<(StatusCode, Json<WhiteboardView>)> {
    let row = whiteboards::create_whiteboard(&core, user.id, user.uuid, input).await?;
    Ok((StatusCode::CREATED, Json(WhiteboardView::new(&core, row))))
}

pub async fn get_one(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<WhiteboardView>> {
    let row = whiteboards::get_whiteboard(&core, user.id, id).await?;
    Ok(Json(WhiteboardView::new(&core, row)))
}

pub async fn update(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<whiteboards::UpdateWhiteboardInput>,
) -> ApiResult<Json<WhiteboardView>> {
    let row = whiteboards::update_whiteboard(&core, user.id, id, input).await?;
    Ok(Json(WhiteboardView::new(&core, row)))
}

pub async fn delete(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    whiteboards::delete_whiteboard(&core, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
