//! JSON error envelope and status mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use studydeck_core::OpError;
use tracing::error;

/// Errors leaving the HTTP layer
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    Op(OpError),
}

impl From<OpError> for ApiError {
    fn from(e: OpError) -> Self {
        Self::Op(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            ApiError::Op(op) => match &op {
                OpError::NotFound => (StatusCode::NOT_FOUND, op.to_string()),
                OpError::Validation(_) | OpError::Unsafe(_) => {
                    (StatusCode::BAD_REQUEST, op.to_string())
                }
                OpError::Blob(_) | OpError::Llm(_) => {
                    error!("Upstream failure: {}", op);
                    (StatusCode::BAD_GATEWAY, "upstream failure".to_string())
                }
                OpError::Database(_) | OpError::Json(_) => {
                    error!("Internal error: {}", op);
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
                }
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
