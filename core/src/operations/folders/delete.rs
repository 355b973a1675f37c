//! Folder deletion cascade
//!
//! Removes a folder subtree: every contained note, whiteboard, file and
//! flashcard group (flashcards go with their group), every descendant
//! folder, and the blob payload behind each deleted entity.
//!
//! Traversal uses an explicit worklist rather than call-stack recursion, so
//! stack usage stays bounded for pathological trees. Per node, blob deletes
//! happen before row deletes; a blob-delete failure is logged and never
//! aborts the relational cleanup (best-effort blob cleanup, strict
//! relational cleanup). A failed row delete aborts the remainder; nothing
//! already deleted is rolled back.

use crate::error::OpResult;
use crate::infrastructure::database::entities::{file, flashcard_group, folder, note, whiteboard};
use crate::operations::delete_blob_best_effort;
use crate::operations::folders::{children_of, get_folder};
use crate::Core;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;
use uuid::Uuid;

/// Delete a folder and its entire subtree
///
/// Fails with NotFound if the folder does not exist or is not owned by the
/// caller. Re-deleting an already-deleted folder therefore returns NotFound.
pub async fn delete_folder(core: &Core, user_id: i32, folder_uuid: Uuid) -> OpResult<()> {
    let root = get_folder(core, user_id, folder_uuid).await?;
    let root_name = root.name.clone();

    // Collect the subtree in preorder: every folder appears before its
    // descendants, so the reverse is a children-before-parent order.
    let mut ordered = Vec::new();
    let mut worklist = vec![root];
    while let Some(current) = worklist.pop() {
        let children = children_of(core, user_id, current.id).await?;
        ordered.push(current);
        worklist.extend(children);
    }

    let folder_count = ordered.len();

    for node in ordered.iter().rev() {
        purge_folder_contents(core, user_id, node.id).await?;

        // Concurrent overlapping deletes may have removed this row already;
        // a zero-row delete is an idempotent no-op.
        folder::Entity::delete_by_id(node.id)
            .exec(core.db.conn())
            .await?;
    }

    info!(
        "Deleted folder \"{}\" and its subtree ({} folders)",
        root_name, folder_count
    );
    Ok(())
}

/// Delete every entity directly contained in one folder, blobs first
async fn purge_folder_contents(core: &Core, user_id: i32, folder_id: i32) -> OpResult<()> {
    let conn = core.db.conn();

    let notes = note::Entity::find()
        .filter(note::Column::UserId.eq(user_id))
        .filter(note::Column::FolderId.eq(folder_id))
        .all(conn)
        .await?;
    for row in &notes {
        delete_blob_best_effort(core, &row.blob_key).await;
    }
    note::Entity::delete_many()
        .filter(note::Column::UserId.eq(user_id))
        .filter(note::Column::FolderId.eq(folder_id))
        .exec(conn)
        .await?;

    let whiteboards = whiteboard::Entity::find()
        .filter(whiteboard::Column::UserId.eq(user_id))
        .filter(whiteboard::Column::FolderId.eq(folder_id))
        .all(conn)
        .await?;
    for row in &whiteboards {
        delete_blob_best_effort(core, &row.blob_key).await;
    }
    whiteboard::Entity::delete_many()
        .filter(whiteboard::Column::UserId.eq(user_id))
        .filter(whiteboard::Column::FolderId.eq(folder_id))
        .exec(conn)
        .await?;

    let files = file::Entity::find()
        .filter(file::Column::UserId.eq(user_id))
        .filter(file::Column::FolderId.eq(folder_id))
        .all(conn)
        .await?;
    for row in &files {
        delete_blob_best_effort(core, &row.blob_key).await;
    }
    file::Entity::delete_many()
        .filter(file::Column::UserId.eq(user_id))
        .filter(file::Column::FolderId.eq(folder_id))
        .exec(conn)
        .await?;

    // Flashcard rows cascade with their group at the relational layer
    let groups = flashcard_group::Entity::find()
        .filter(flashcard_group::Column::UserId.eq(user_id))
        .filter(flashcard_group::Column::FolderId.eq(folder_id))
        .all(conn)
        .await?;
    for row in &groups {
        delete_blob_best_effort(core, &row.blob_key).await;
    }
    flashcard_group::Entity::delete_many()
        .filter(flashcard_group::Column::UserId.eq(user_id))
        .filter(flashcard_group::Column::FolderId.eq(folder_id))
        .exec(conn)
        .await?;

    Ok(())
}
