//! Flashcard groups and cards

mod generate;
pub mod guardrails;

pub use generate::{generate_flashcards, GenerateFlashcardsInput, GeneratedGroup, GenerationRecord};

use crate::error::{OpError, OpResult};
use crate::infrastructure::database::entities::{
    flashcard, flashcard_group, FlashcardActive, FlashcardGroupActive,
};
use crate::operations::folders::get_folder;
use crate::operations::{delete_blob_best_effort, require_non_blank};
use crate::Core;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use uuid::Uuid;

/// Card update arguments; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateFlashcardInput {
    pub term: Option<String>,
    pub explanation: Option<String>,
}

/// Look up a group by uuid, scoped to its owner
pub async fn get_group(
    core: &Core,
    user_id: i32,
    group_uuid: Uuid,
) -> OpResult<flashcard_group::Model> {
    flashcard_group::Entity::find()
        .filter(flashcard_group::Column::Uuid.eq(group_uuid))
        .filter(flashcard_group::Column::UserId.eq(user_id))
        .one(core.db.conn())
        .await?
        .ok_or(OpError::NotFound)
}

/// List the groups directly contained in a folder
pub async fn list_groups(
    core: &Core,
    user_id: i32,
    folder_uuid: Uuid,
) -> OpResult<Vec<flashcard_group::Model>> {
    let folder = get_folder(core, user_id, folder_uuid).await?;
    Ok(flashcard_group::Entity::find()
        .filter(flashcard_group::Column::UserId.eq(user_id))
        .filter(flashcard_group::Column::FolderId.eq(folder.id))
        .order_by_asc(flashcard_group::Column::Name)
        .all(core.db.conn())
        .await?)
}

/// The cards of a group, in display order
pub async fn group_cards(core: &Core, group_id: i32) -> OpResult<Vec<flashcard::Model>> {
    Ok(flashcard::Entity::find()
        .filter(flashcard::Column::GroupId.eq(group_id))
        .order_by_asc(flashcard::Column::Position)
        .all(core.db.conn())
        .await?)
}

/// Rename a group
pub async fn rename_group(
    core: &Core,
    user_id: i32,
    group_uuid: Uuid,
    new_name: &str,
) -> OpResult<flashcard_group::Model> {
    let name = require_non_blank(new_name, "group name")?;
    let found = get_group(core, user_id, group_uuid).await?;

    let mut active: FlashcardGroupActive = found.into();
    active.name = Set(name);
    active.updated_at = Set(Utc::now());
    Ok(active.update(core.db.conn()).await?)
}

/// Delete a group: generation-record blob best-effort, then the row (cards
/// cascade at the relational layer)
pub async fn delete_group(core: &Core, user_id: i32, group_uuid: Uuid) -> OpResult<()> {
    let found = get_group(core, user_id, group_uuid).await?;
    delete_blob_best_effort(core, &found.blob_key).await;
    flashcard_group::Entity::delete_by_id(found.id)
        .exec(core.db.conn())
        .await?;
    Ok(())
}

/// Look up one card within a user-owned group
async fn get_card(
    core: &Core,
    user_id: i32,
    group_uuid: Uuid,
    card_uuid: Uuid,
) -> OpResult<flashcard::Model> {
    let group = get_group(core, user_id, group_uuid).await?;
    flashcard::Entity::find()
        .filter(flashcard::Column::Uuid.eq(card_uuid))
        .filter(flashcard::Column::GroupId.eq(group.id))
        .one(core.db.conn())
        .await?
        .ok_or(OpError::NotFound)
}

/// Update a card's term and/or explanation
pub async fn update_card(
    core: &Core,
    user_id: i32,
    group_uuid: Uuid,
    card_uuid: Uuid,
    input: UpdateFlashcardInput,
) -> OpResult<flashcard::Model> {
    let found = get_card(core, user_id, group_uuid, card_uuid).await?;

    let mut active: FlashcardActive = found.into();
    if let Some(term) = &input.term {
        active.term = Set(require_non_blank(term, "flashcard term")?);
    }
    if let Some(explanation) = &input.explanation {
        active.explanation = Set(require_non_blank(explanation, "flashcard explanation")?);
    }
    active.updated_at = Set(Utc::now());
    Ok(active.update(core.db.conn()).await?)
}

/// Delete a single card from a group
pub async fn delete_card(
    core: &Core,
    user_id: i32,
    group_uuid: Uuid,
    card_uuid: Uuid,
) -> OpResult<()> {
    let found = get_card(core, user_id, group_uuid, card_uuid).await?;
    flashcard::Entity::delete_by_id(found.id)
        .exec(core.db.conn())
        .await?;
    Ok(())
}
