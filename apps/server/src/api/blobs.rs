//! Signed blob reads
//!
//! Blob payloads are served only through URLs issued by the core's signer;
//! the signature covers the key and expiry.

use super::error::{ApiError, ApiResult};
use super::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use studydeck_core::OpError;

#[derive(Deserialize)]
pub struct SignedQuery {
    expires: i64,
    sig: String,
}

pub async fn read(
    State(core): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<SignedQuery>,
) -> ApiResult<impl IntoResponse> {
    if !core.signer.verify(&key, query.expires, &query.sig) {
        return Err(ApiError::Unauthorized);
    }

    let bytes = core.blob.get(&key).await.map_err(|e| match e {
        studydeck_core::infrastructure::blob::BlobError::NotFound(_) => {
            ApiError::Op(OpError::NotFound)
        }
        other => ApiError::Op(OpError::Blob(other)),
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    ))
}
