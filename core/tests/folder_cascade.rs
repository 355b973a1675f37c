//! Folder deletion cascade

mod common;

use common::{drafts, seed_user, test_core, MockLlm};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use studydeck_core::infrastructure::database::entities::flashcard;
use studydeck_core::operations::content::{SourceItem, SourceKind};
use studydeck_core::operations::{files, flashcards, folders, notes, whiteboards};
use studydeck_core::OpError;
use tempfile::tempdir;

#[tokio::test]
async fn deletes_subtree_rows_and_blobs() {
    let dir = tempdir().unwrap();
    let llm = MockLlm::returning(drafts(5));
    let core = test_core(dir.path(), llm).await;
    let user = seed_user(&core, "user_cascade").await;

    let root = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Biology".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();
    let child = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Cells".into(),
            parent_id: Some(root.uuid),
        },
    )
    .await
    .unwrap();
    let grandchild = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Organelles".into(),
            parent_id: Some(child.uuid),
        },
    )
    .await
    .unwrap();

    let note = notes::create_note(
        &core,
        user.id,
        user.uuid,
        notes::CreateNoteInput {
            folder_id: child.uuid,
            title: "Mitochondria".into(),
            content: json!({"text": "powerhouse of the cell"}),
        },
    )
    .await
    .unwrap();
    let board = whiteboards::create_whiteboard(
        &core,
        user.id,
        user.uuid,
        whiteboards::CreateWhiteboardInput {
            folder_id: grandchild.uuid,
            title: "Membrane sketch".into(),
            content: json!({"elements": [{"text": "lipid bilayer"}]}),
        },
    )
    .await
    .unwrap();
    let file = files::upload_file(
        &core,
        user.id,
        user.uuid,
        files::UploadFileInput {
            folder_id: root.uuid,
            file_name: "syllabus.txt".into(),
            mime_type: "text/plain".into(),
            bytes: b"week 1: cells".to_vec(),
        },
    )
    .await
    .unwrap();
    let generated = flashcards::generate_flashcards(
        &core,
        user.id,
        user.uuid,
        flashcards::GenerateFlashcardsInput {
            folder_id: child.uuid,
            name: "Cell basics".into(),
            items: vec![SourceItem {
                kind: SourceKind::Note,
                id: note.uuid,
            }],
            count: Some(5),
            instructions: None,
        },
    )
    .await
    .unwrap();

    // Content outside the subtree must survive
    let sibling = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Chemistry".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();
    let sibling_note = notes::create_note(
        &core,
        user.id,
        user.uuid,
        notes::CreateNoteInput {
            folder_id: sibling.uuid,
            title: "Acids".into(),
            content: json!({"text": "proton donors"}),
        },
    )
    .await
    .unwrap();

    let other = seed_user(&core, "user_other").await;
    let other_folder = folders::create_folder(
        &core,
        other.id,
        folders::CreateFolderInput {
            name: "Biology".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();

    folders::delete_folder(&core, user.id, root.uuid)
        .await
        .unwrap();

    for folder_uuid in [root.uuid, child.uuid, grandchild.uuid] {
        assert!(matches!(
            folders::get_folder(&core, user.id, folder_uuid).await,
            Err(OpError::NotFound)
        ));
    }
    assert!(matches!(
        notes::get_note(&core, user.id, note.uuid).await,
        Err(OpError::NotFound)
    ));
    assert!(matches!(
        whiteboards::get_whiteboard(&core, user.id, board.uuid).await,
        Err(OpError::NotFound)
    ));
    assert!(matches!(
        files::get_file(&core, user.id, file.uuid).await,
        Err(OpError::NotFound)
    ));
    assert!(matches!(
        flashcards::get_group(&core, user.id, generated.group.uuid).await,
        Err(OpError::NotFound)
    ));

    // Card rows cascade with their group
    let remaining_cards = flashcard::Entity::find()
        .filter(flashcard::Column::GroupId.eq(generated.group.id))
        .all(core.db.conn())
        .await
        .unwrap();
    assert!(remaining_cards.is_empty());

    // Blob payloads are gone too
    for key in [
        &note.blob_key,
        &board.blob_key,
        &file.blob_key,
        &generated.group.blob_key,
    ] {
        assert!(core.blob.get(key).await.is_err());
    }

    // Siblings and other users are untouched
    folders::get_folder(&core, user.id, sibling.uuid)
        .await
        .unwrap();
    let payload = notes::note_content(&core, user.id, sibling_note.uuid)
        .await
        .unwrap();
    assert!(!payload.is_empty());
    folders::get_folder(&core, other.id, other_folder.uuid)
        .await
        .unwrap();
}

#[tokio::test]
async fn redelete_reports_not_found() {
    let dir = tempdir().unwrap();
    let core = test_core(dir.path(), MockLlm::returning(vec![])).await;
    let user = seed_user(&core, "user_redelete").await;

    let folder = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Scratch".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();

    folders::delete_folder(&core, user.id, folder.uuid)
        .await
        .unwrap();
    assert!(matches!(
        folders::delete_folder(&core, user.id, folder.uuid).await,
        Err(OpError::NotFound)
    ));
}

#[tokio::test]
async fn cannot_delete_another_users_folder() {
    let dir = tempdir().unwrap();
    let core = test_core(dir.path(), MockLlm::returning(vec![])).await;
    let owner = seed_user(&core, "user_owner").await;
    let intruder = seed_user(&core, "user_intruder").await;

    let folder = folders::create_folder(
        &core,
        owner.id,
        folders::CreateFolderInput {
            name: "Private".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();

    assert!(matches!(
        folders::delete_folder(&core, intruder.id, folder.uuid).await,
        Err(OpError::NotFound)
    ));
    folders::get_folder(&core, owner.id, folder.uuid)
        .await
        .unwrap();
}
