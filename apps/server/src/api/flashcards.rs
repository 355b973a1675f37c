//! Flashcard endpoints

use super::auth::AuthUser;
use super::error::ApiResult;
use super::views::{FlashcardGroupView, FlashcardView, GroupWithCardsView};
use super::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use studydeck_core::operations::flashcards;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListQuery {
    folder_id: Uuid,
}

#[derive(Deserialize)]
pub struct RenameBody {
    name: String,
}

pub async fn list_groups(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<FlashcardGroupView>>> {
    let rows = flashcards::list_groups(&core, user.id, query.folder_id).await?;
    Ok(Json(rows.into_iter().map(FlashcardGroupView::from).collect()))
}

pub async fn generate(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<flashcards::GenerateFlashcardsInput>,
) -> ApiResult<(StatusCode, Json<GroupWithCardsView>)> {
    let generated = flashcards::generate_flashcards(&core, user.id, user.uuid, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(GroupWithCardsView {
            group: generated.group.into(),
            flashcards: generated.cards.into_iter().map(FlashcardView::from).collect(),
        }),
    ))
}

pub async fn get_group(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<GroupWithCardsView>> {
    let group = flashcards::get_group(&core, user.id, group_id).await?;
    let cards = flashcards::group_cards(&core, group.id).await?;
    Ok(Json(GroupWithCardsView {
        group: group.into(),
        flashcards: cards.into_iter().map(FlashcardView::from).collect(),
    }))
}

pub async fn rename_group(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
    Json(body): Json<RenameBody>,
) -> ApiResult<Json<FlashcardGroupView>> {
    let row = flashcards::rename_group(&core, user.id, group_id, &body.name).await?;
    Ok(Json(row.into()))
}

pub async fn delete_group(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    flashcards::delete_group(&core, user.id, group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_card(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path((group_id, id)): Path<(Uuid, Uuid)>,
    Json(input): Json<flashcards::UpdateFlashcardInput>,
) -> ApiResult<Json<FlashcardView>> {
    let row = flashcards::update_card(&core, user.id, group_id, id, input).await?;
    Ok(Json(row.into()))
}

pub async fn delete_card(
    State(core): State<AppState>,
    AuthUser(user): AuthUser,
    Path((group_id, id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    flashcards::delete_card(&core, user.id, group_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
