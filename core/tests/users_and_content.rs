//! Webhook upserts and per-entity CRUD behavior

mod common;

use common::{seed_user, test_core, MockLlm};
use serde_json::json;
use studydeck_core::operations::users::{self, WebhookUser};
use studydeck_core::operations::{files, folders, notes, whiteboards};
use studydeck_core::OpError;
use tempfile::tempdir;

#[tokio::test]
async fn webhook_upsert_is_idempotent() {
    let dir = tempdir().unwrap();
    let core = test_core(dir.path(), MockLlm::returning(vec![])).await;

    let created = users::upsert_from_webhook(
        &core,
        WebhookUser {
            external_id: "user_wh1".into(),
            email: "first@example.com".into(),
            name: "Ada".into(),
        },
    )
    .await
    .unwrap();

    let updated = users::upsert_from_webhook(
        &core,
        WebhookUser {
            external_id: "user_wh1".into(),
            email: "second@example.com".into(),
            name: "Ada L".into(),
        },
    )
    .await
    .unwrap();

    // Same row, refreshed profile
    assert_eq!(created.id, updated.id);
    assert_eq!(created.uuid, updated.uuid);
    assert_eq!(updated.email, "second@example.com");
    assert_eq!(updated.name, "Ada L");

    let resolved = users::resolve(&core, "user_wh1").await.unwrap();
    assert_eq!(resolved.id, created.id);
}

#[tokio::test]
async fn deleting_a_user_removes_owned_content() {
    let dir = tempdir().unwrap();
    let core = test_core(dir.path(), MockLlm::returning(vec![])).await;
    let user = seed_user(&core, "user_full").await;
    let bystander = seed_user(&core, "user_bystander").await;

    let root = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Everything".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();
    let child = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Nested".into(),
            parent_id: Some(root.uuid),
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
            title: "Keepsake".into(),
            content: json!({"text": "to be removed"}),
        },
    )
    .await
    .unwrap();

    let kept = folders::create_folder(
        &core,
        bystander.id,
        folders::CreateFolderInput {
            name: "Untouched".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();

    users::delete_by_external_id(&core, "user_full")
        .await
        .unwrap();

    assert!(matches!(
        users::resolve(&core, "user_full").await,
        Err(OpError::NotFound)
    ));
    assert!(matches!(
        folders::get_folder(&core, user.id, root.uuid).await,
        Err(OpError::NotFound)
    ));
    assert!(matches!(
        folders::get_folder(&core, user.id, child.uuid).await,
        Err(OpError::NotFound)
    ));
    assert!(matches!(
        notes::get_note(&core, user.id, note.uuid).await,
        Err(OpError::NotFound)
    ));
    assert!(core.blob.get(&note.blob_key).await.is_err());

    // Other accounts keep their content
    folders::get_folder(&core, bystander.id, kept.uuid)
        .await
        .unwrap();
}

#[tokio::test]
async fn deleting_a_user_twice_reports_not_found() {
    let dir = tempdir().unwrap();
    let core = test_core(dir.path(), MockLlm::returning(vec![])).await;
    seed_user(&core, "user_gone").await;

    users::delete_by_external_id(&core, "user_gone")
        .await
        .unwrap();
    assert!(matches!(
        users::resolve(&core, "user_gone").await,
        Err(OpError::NotFound)
    ));
    assert!(matches!(
        users::delete_by_external_id(&core, "user_gone").await,
        Err(OpError::NotFound)
    ));
}

#[tokio::test]
async fn rejects_blank_names_on_create_and_rename() {
    let dir = tempdir().unwrap();
    let core = test_core(dir.path(), MockLlm::returning(vec![])).await;
    let user = seed_user(&core, "user_blank").await;

    assert!(matches!(
        folders::create_folder(
            &core,
            user.id,
            folders::CreateFolderInput {
                name: "   ".into(),
                parent_id: None,
            },
        )
        .await,
        Err(OpError::Validation(_))
    ));

    let folder = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Maths".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();
    assert!(matches!(
        folders::rename_folder(&core, user.id, folder.uuid, "  ").await,
        Err(OpError::Validation(_))
    ));
}

#[tokio::test]
async fn note_content_round_trips_through_the_blob_store() {
    let dir = tempdir().unwrap();
    let core = test_core(dir.path(), MockLlm::returning(vec![])).await;
    let user = seed_user(&core, "user_notes").await;
    let folder = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "History".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();

    let original = json!({"text": "the printing press, 1440"});
    let note = notes::create_note(
        &core,
        user.id,
        user.uuid,
        notes::CreateNoteInput {
            folder_id: folder.uuid,
            title: "Printing".into(),
            content: original.clone(),
        },
    )
    .await
    .unwrap();

    let bytes = notes::note_content(&core, user.id, note.uuid)
        .await
        .unwrap();
    let loaded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(loaded, original);

    // Updating content overwrites the same blob key
    let revised = json!({"text": "movable type, Gutenberg"});
    notes::update_note(
        &core,
        user.id,
        note.uuid,
        notes::UpdateNoteInput {
            title: None,
            content: Some(revised.clone()),
        },
    )
    .await
    .unwrap();
    let bytes = notes::note_content(&core, user.id, note.uuid)
        .await
        .unwrap();
    let loaded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(loaded, revised);

    notes::delete_note(&core, user.id, note.uuid).await.unwrap();
    assert!(matches!(
        notes::get_note(&core, user.id, note.uuid).await,
        Err(OpError::NotFound)
    ));
    assert!(core.blob.get(&note.blob_key).await.is_err());
}

#[tokio::test]
async fn rejected_updates_leave_stored_content_unchanged() {
    let dir = tempdir().unwrap();
    let core = test_core(dir.path(), MockLlm::returning(vec![])).await;
    let user = seed_user(&core, "user_patch").await;
    let folder = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Drafts".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();

    let original = json!({"text": "original"});
    let note = notes::create_note(
        &core,
        user.id,
        user.uuid,
        notes::CreateNoteInput {
            folder_id: folder.uuid,
            title: "Draft".into(),
            content: original.clone(),
        },
    )
    .await
    .unwrap();

    // A blank title fails validation; the content carried alongside it
    // must not have been written
    let result = notes::update_note(
        &core,
        user.id,
        note.uuid,
        notes::UpdateNoteInput {
            title: Some("   ".into()),
            content: Some(json!({"text": "overwritten"})),
        },
    )
    .await;
    assert!(matches!(result, Err(OpError::Validation(_))));

    let bytes = notes::note_content(&core, user.id, note.uuid)
        .await
        .unwrap();
    let loaded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(loaded, original);

    // Same contract for whiteboards
    let sketch = json!({"elements": [{"text": "axes"}]});
    let board = whiteboards::create_whiteboard(
        &core,
        user.id,
        user.uuid,
        whiteboards::CreateWhiteboardInput {
            folder_id: folder.uuid,
            title: "Graph".into(),
            content: sketch.clone(),
        },
    )
    .await
    .unwrap();
    let result = whiteboards::update_whiteboard(
        &core,
        user.id,
        board.uuid,
        whiteboards::UpdateWhiteboardInput {
            title: Some("".into()),
            content: Some(json!({"elements": []})),
        },
    )
    .await;
    assert!(matches!(result, Err(OpError::Validation(_))));

    let bytes = whiteboards::whiteboard_content(&core, user.id, board.uuid)
        .await
        .unwrap();
    let loaded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(loaded, sketch);
}

#[tokio::test]
async fn upload_enforces_the_size_limit_and_sanitizes_keys() {
    let dir = tempdir().unwrap();
    let mut core = test_core(dir.path(), MockLlm::returning(vec![])).await;
    core.config.limits.max_upload_bytes = 16;
    let user = seed_user(&core, "user_files").await;
    let folder = folders::create_folder(
        &core,
        user.id,
        folders::CreateFolderInput {
            name: "Uploads".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();

    let result = files::upload_file(
        &core,
        user.id,
        user.uuid,
        files::UploadFileInput {
            folder_id: folder.uuid,
            file_name: "big.bin".into(),
            mime_type: "application/octet-stream".into(),
            bytes: vec![0u8; 32],
        },
    )
    .await;
    assert!(matches!(result, Err(OpError::Validation(_))));

    let file = files::upload_file(
        &core,
        user.id,
        user.uuid,
        files::UploadFileInput {
            folder_id: folder.uuid,
            file_name: "lecture notes.pdf".into(),
            mime_type: "application/pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        },
    )
    .await
    .unwrap();

    // Row keeps the original name; the key carries the sanitized one
    assert_eq!(file.file_name, "lecture notes.pdf");
    assert!(file.blob_key.ends_with("lecture_notes.pdf"));
    assert_eq!(file.size_bytes, 8);

    let payload = files::file_content(&core, user.id, file.uuid)
        .await
        .unwrap();
    assert_eq!(payload, b"%PDF-1.4");
}

#[tokio::test]
async fn lookups_are_scoped_to_the_owner() {
    let dir = tempdir().unwrap();
    let core = test_core(dir.path(), MockLlm::returning(vec![])).await;
    let owner = seed_user(&core, "user_a").await;
    let other = seed_user(&core, "user_b").await;

    let folder = folders::create_folder(
        &core,
        owner.id,
        folders::CreateFolderInput {
            name: "Mine".into(),
            parent_id: None,
        },
    )
    .await
    .unwrap();
    let note = notes::create_note(
        &core,
        owner.id,
        owner.uuid,
        notes::CreateNoteInput {
            folder_id: folder.uuid,
            title: "Secret plan".into(),
            content: json!({"text": "step one"}),
        },
    )
    .await
    .unwrap();

    assert!(matches!(
        folders::get_folder(&core, other.id, folder.uuid).await,
        Err(OpError::NotFound)
    ));
    assert!(matches!(
        notes::get_note(&core, other.id, note.uuid).await,
        Err(OpError::NotFound)
    ));
    assert!(matches!(
        notes::note_content(&core, other.id, note.uuid).await,
        Err(OpError::NotFound)
    ));
}
