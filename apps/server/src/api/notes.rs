//! Note endpoints

use super::auth::AuthUser;
use super::error::ApiResult;
use super::views::NoteView;
use super::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use studydeck_core::operations::notes;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListQuery {
    folder_id: Uuid,
}

pub async fn list(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<NoteView>>> {
    let rows = notes::list_notes(&core, user.id, query.folder_id).await?;
    Ok(Json(
        rows.into_iter().map(|m| NoteView::new(&core, m)).collect(),
    ))
}

pub async fn create(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<notes::CreateNoteInput>,
) -> ApiResult<(StatusCode, Json<NoteView>)> {
    let row = notes::create_note(&core, user.id, user.uuid, input).await?;
    Ok((StatusCode::CREATED, Json(NoteView::new(&core, row))))
}

pub async fn get_one(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NoteView>> {
    let row = notes::get_note(&core, user.id, id).await?;
    Ok(Json(NoteView::new(&core, row)))
}

pub async fn update(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<notes::UpdateNoteInput>,
) -> ApiResult<Json<NoteView>> {
    let row = notes::update_note(&core, user.id, id, input).await?;
    Ok(Json(NoteView::new(&core, row)))
}

pub async fn delete(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    notes::delete_note(&core, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
