//! Identity-provider webhook
//!
//! Upserts a user row keyed by the external identity id. Signature
//! verification of the webhook payload is delegated to the deployment
//! (reverse proxy) and is out of scope here.

use super::error::{ApiError, ApiResult};
use super::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use studydeck_core::operations::users;
use studydeck_core::OpError;
use tracing::info;

#[derive(Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookData,
}

#[derive(Deserialize)]
pub struct WebhookData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}

pub async fn webhook(
    State(core): State<AppState>,
    Json(event): Json<WebhookEvent>,
) -> ApiResult<StatusCode> {
    match event.event_type.as_str() {
        "user.created" | "user.updated" => {
            let email = event
                .data
                .email_addresses
                .first()
                .map(|e| e.email_address.clone())
                .unwrap_or_default();
            let name = [event.data.first_name, event.data.last_name]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");

            users::upsert_from_webhook(
                &core,
                users::WebhookUser {
                    external_id: event.data.id,
                    email,
                    name,
                },
            )
            .await?;
            Ok(StatusCode::OK)
        }
        "user.deleted" => {
            match users::delete_by_external_id(&core, &event.data.id).await {
                // Replayed deletions are fine
                Ok(()) | Err(OpError::NotFound) => Ok(StatusCode::OK),
                Err(e) => Err(ApiError::Op(e)),
            }
        }
        other => {
            info!("Ignoring webhook event type {}", other);
            Ok(StatusCode::OK)
        }
    }
}
