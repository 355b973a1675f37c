//! Bearer session token authentication
//!
//! Tokens are opaque strings `{external_id}.{expires}.{mac}` MAC'd with the
//! configured auth secret. The extractor verifies the token and resolves
//! the internal user row, so every handler works with an already-scoped
//! user id.

use super::error::ApiError;
use super::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use studydeck_core::infrastructure::database::entities::user;
use studydeck_core::operations::users;

const KEY_CONTEXT: &str = "studydeck 2025-06-01 session token";

fn mac(secret: &str, external_id: &str, expires: i64) -> String {
    let key = blake3::derive_key(KEY_CONTEXT, secret.as_bytes());
    let msg = format!("{}\n{}", external_id, expires);
    blake3::keyed_hash(&key, msg.as_bytes()).to_hex().to_string()
}

/// Issue a session token for an external identity id
pub fn issue_token(secret: &str, external_id: &str, ttl_secs: i64) -> String {
    let expires = Utc::now().timestamp() + ttl_secs;
    format!(
        "{}.{}.{}",
        external_id,
        expires,
        mac(secret, external_id, expires)
    )
}

/// Verify a token and return the external identity id it carries
pub fn verify_token(secret: &str, token: &str) -> Option<String> {
    let mut parts = token.rsplitn(3, '.');
    let sig = parts.next()?;
    let expires: i64 = parts.next()?.parse().ok()?;
    let external_id = parts.next()?;

    if expires < Utc::now().timestamp() {
        return None;
    }
    let expected = mac(secret, external_id, expires);
    // blake3::Hash equality is constant-time
    if blake3::hash(expected.as_bytes()) != blake3::hash(sig.as_bytes()) {
        return None;
    }
    Some(external_id.to_string())
}

/// The authenticated caller, resolved to its user row
pub struct AuthUser(pub user::Model);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let external_id = verify_token(&state.config.auth_secret, token)
            .ok_or(ApiError::Unauthorized)?;

        // An unknown external id is unauthorized, not a 404: the session is
        // valid only for users the webhook has provisioned
        let user = users::resolve(state, &external_id)
            .await
            .map_err(|_| ApiError::Unauthorized)?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_tokens() {
        let token = issue_token("secret", "user_abc123", 60);
        assert_eq!(
            verify_token("secret", &token).as_deref(),
            Some("user_abc123")
        );
    }

    #[test]
    fn rejects_forged_and_expired_tokens() {
        let token = issue_token("secret", "user_abc123", 60);
        assert!(verify_token("other-secret", &token).is_none());

        let expired = issue_token("secret", "user_abc123", -10);
        assert!(verify_token("secret", &expired).is_none());

        assert!(verify_token("secret", "not-a-token").is_none());
    }
}
