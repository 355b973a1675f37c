//! Flashcard generation pipeline
//!
//! Validation order: folder ownership, requested count bounds, cumulative
//! file size cap, instruction guardrails, non-empty extracted text. The
//! guardrails run before extraction since extracting an image source
//! already calls the vision model; no model call happens after a guardrail
//! rejection. Every check happens before any mutation; on failure nothing
//! is persisted.
//! One LLM call produces the drafts; a result below the minimum card count
//! is a validation failure. On success exactly one group row, its card
//! rows and one generation-record blob are created.

use super::guardrails;
use crate::error::{OpError, OpResult};
use crate::infrastructure::database::entities::{
    flashcard, flashcard_group, FlashcardActive, FlashcardGroupActive,
};
use crate::infrastructure::llm::GenerationRequest;
use crate::operations::content::{self, SourceItem};
use crate::operations::folders::get_folder;
use crate::operations::require_non_blank;
use crate::Core;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

const DEFAULT_COUNT: u32 = 10;

/// Inputs for one generation request
#[derive(Debug, Deserialize)]
pub struct GenerateFlashcardsInput {
    pub folder_id: Uuid,
    pub name: String,
    pub items: Vec<SourceItem>,
    /// Desired number of flashcards; defaults when absent
    pub count: Option<u32>,
    /// Optional free-text instructions, guardrail-checked
    pub instructions: Option<String>,
}

/// A persisted group with its cards
#[derive(Debug, Serialize)]
pub struct GeneratedGroup {
    pub group: flashcard_group::Model,
    pub cards: Vec<flashcard::Model>,
}

/// Full generation record stored as the group's blob payload
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub source_items: Vec<SourceItem>,
    pub instructions: Option<String>,
    pub requested_count: u32,
    pub produced_count: u32,
    pub generated_at: DateTime<Utc>,
}

/// Run the full pipeline for one generation request
pub async fn generate_flashcards(
    core: &Core,
    user_id: i32,
    user_uuid: Uuid,
    input: GenerateFlashcardsInput,
) -> OpResult<GeneratedGroup> {
    let limits = &core.config.limits;
    let name = require_non_blank(&input.name, "group name")?;

    // (a) folder ownership
    let folder = get_folder(core, user_id, input.folder_id).await?;

    if input.items.is_empty() {
        return Err(OpError::validation("at least one source item is required"));
    }

    // (b) requested count bounds
    let count = input.count.unwrap_or(DEFAULT_COUNT);
    if count < limits.min_flashcards {
        return Err(OpError::validation(format!(
            "at least {} flashcards must be requested",
            limits.min_flashcards
        )));
    }
    if count > limits.max_flashcards {
        return Err(OpError::validation(format!(
            "at most {} flashcards may be requested",
            limits.max_flashcards
        )));
    }

    // (c) cumulative file size cap, before any extraction or LLM call
    let total_bytes = content::referenced_file_bytes(core, user_id, &input.items).await?;
    if total_bytes > limits.max_source_bytes {
        return Err(OpError::validation(format!(
            "selected files total {} bytes, above the {} byte limit",
            total_bytes, limits.max_source_bytes
        )));
    }

    // (d) instruction guardrails
    if let Some(instructions) = &input.instructions {
        guardrails::check_instructions(instructions).map_err(OpError::Unsafe)?;
    }

    // (e) extraction must yield some text
    let extracted = content::extract_items(core, user_id, &input.items).await?;
    let source_text = content::aggregate(&extracted);
    if source_text.trim().is_empty() {
        return Err(OpError::validation(
            "no text could be extracted from the selected items",
        ));
    }

    let drafts = core
        .llm
        .generate_flashcards(&GenerationRequest {
            source_text,
            count,
            instructions: input.instructions.clone(),
        })
        .await?;

    let drafts: Vec<_> = drafts
        .into_iter()
        .filter(|d| !d.term.trim().is_empty() && !d.explanation.trim().is_empty())
        .collect();
    if (drafts.len() as u32) < limits.min_flashcards {
        return Err(OpError::validation(format!(
            "generation produced {} flashcards, fewer than the minimum of {}",
            drafts.len(),
            limits.min_flashcards
        )));
    }

    // Persist: generation record blob first, then rows
    let group_uuid = Uuid::new_v4();
    let blob_key = format!(
        "flashcard-group/{}/{}/{}",
        user_uuid, folder.uuid, group_uuid
    );
    let record = GenerationRecord {
        source_items: input.items,
        instructions: input.instructions,
        requested_count: count,
        produced_count: drafts.len() as u32,
        generated_at: Utc::now(),
    };
    core.blob
        .put(&blob_key, &serde_json::to_vec(&record)?)
        .await?;

    let now = Utc::now();
    let txn = core.db.conn().begin().await?;

    let group = FlashcardGroupActive {
        uuid: Set(group_uuid),
        user_id: Set(user_id),
        folder_id: Set(folder.id),
        name: Set(name),
        blob_key: Set(blob_key),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut cards = Vec::with_capacity(drafts.len());
    for (position, draft) in drafts.into_iter().enumerate() {
        let card = FlashcardActive {
            uuid: Set(Uuid::new_v4()),
            group_id: Set(group.id),
            term: Set(draft.term.trim().to_string()),
            explanation: Set(draft.explanation.trim().to_string()),
            position: Set(position as i32),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        cards.push(card);
    }

    txn.commit().await?;

    info!(
        "Generated flashcard group \"{}\" with {} cards",
        group.name,
        cards.len()
    );

    Ok(GeneratedGroup { group, cards })
}
