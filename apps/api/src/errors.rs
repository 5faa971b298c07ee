use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Llm(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_)
            | AppError::Template(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the user. Upstream and I/O details stay in
    /// the logs (see [`AppError::log`]).
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Llm(_) => {
                "The AI service could not generate a resume. Please try again.".to_string()
            }
            AppError::Render(_) => "The resume could not be rendered as a PDF.".to_string(),
            AppError::Template(_) => "The page could not be rendered.".to_string(),
            AppError::Storage(_) => "The resume PDF could not be saved.".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    /// Logs server-side failures with their full detail. Client errors are
    /// not logged.
    pub fn log(&self) {
        match self {
            AppError::NotFound(_) | AppError::Validation(_) => {}
            AppError::Llm(e) => tracing::error!("LLM error: {e}"),
            AppError::Render(e) => tracing::error!("Render error: {e}"),
            AppError::Template(e) => tracing::error!("Template error: {e}"),
            AppError::Storage(e) => tracing::error!("Storage error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.public_message()
            }
        }));

        (status, body).into_response()
    }
}
