//! User rows and identity-provider webhook upserts

use crate::error::{OpError, OpResult};
use crate::infrastructure::database::entities::{folder, user, UserActive};
use crate::operations::folders;
use crate::Core;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Payload of an identity-provider webhook event
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookUser {
    pub external_id: String,
    pub email: String,
    pub name: String,
}

/// Upsert a user row keyed by external identity-provider id
///
/// Created on the first event for an id, updated on profile changes.
/// Idempotent: replaying an event leaves the row unchanged apart from
/// `updated_at`.
pub async fn upsert_from_webhook(core: &Core, payload: WebhookUser) -> OpResult<user::Model> {
    let existing = user::Entity::find()
        .filter(user::Column::ExternalId.eq(payload.external_id.as_str()))
        .one(core.db.conn())
        .await?;

    let now = Utc::now();
    match existing {
        Some(found) => {
            let mut active: UserActive = found.into();
            active.email = Set(payload.email);
            active.name = Set(payload.name);
            active.updated_at = Set(now);
            Ok(active.update(core.db.conn()).await?)
        }
        None => {
            let active = UserActive {
                uuid: Set(Uuid::new_v4()),
                external_id: Set(payload.external_id.clone()),
                email: Set(payload.email),
                name: Set(payload.name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            let created = active.insert(core.db.conn()).await?;
            info!("Created user for external id {}", payload.external_id);
            Ok(created)
        }
    }
}

/// Remove a deleted identity-provider account and everything it owns
///
/// Runs the folder deletion cascade over each of the user's root folders,
/// so blob payloads are cleaned up alongside the rows and the restrictive
/// folder-children foreign keys are satisfied, then deletes the user row.
pub async fn delete_by_external_id(core: &Core, external_id: &str) -> OpResult<()> {
    let user = resolve(core, external_id).await?;

    let roots = folder::Entity::find()
        .filter(folder::Column::UserId.eq(user.id))
        .filter(folder::Column::ParentId.is_null())
        .all(core.db.conn())
        .await?;
    for root in roots {
        folders::delete_folder(core, user.id, root.uuid).await?;
    }

    user::Entity::delete_by_id(user.id)
        .exec(core.db.conn())
        .await?;
    info!("Deleted user for external id {}", external_id);
    Ok(())
}

/// Resolve the internal user row for an external identity id
pub async fn resolve(core: &Core, external_id: &str) -> OpResult<user::Model> {
    user::Entity::find()
        .filter(user::Column::ExternalId.eq(external_id))
        .one(core.db.conn())
        .await?
        .ok_or(OpError::NotFound)
}
