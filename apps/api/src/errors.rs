use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::compile::CompileError;
use crate::render::RenderError;
use crate::storage::StorageError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Render(RenderError::InvalidDocument(msg)) => (
                StatusCode::BAD_REQUEST,
                "INVALID_DOCUMENT",
                msg.clone(),
            ),
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ASSEMBLY_ERROR",
                    "The document could not be assembled".to_string(),
                )
            }
            AppError::Compile(e) => {
                tracing::error!("Compile error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "COMPILE_ERROR",
                    "The document could not be compiled".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
