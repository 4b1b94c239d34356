use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ai::extract::ExtractError;
use crate::ai::validate::ValidateError;
use crate::export::ExportError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Malformed AI response: {0}")]
    MalformedAiResponse(#[from] ExtractError),

    #[error("{0}")]
    AiResult(#[from] ValidateError),

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    #[error("Template render error: {0}")]
    TemplateRender(String),

    #[error("Export render error: {0}")]
    ExportRender(String),

    #[error("Export engine error: {0}")]
    ExportEngine(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::TemplateNotFound(name) => AppError::TemplateNotFound(name),
            RenderError::Render(e) => AppError::TemplateRender(e.to_string()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Render(detail) => AppError::ExportRender(detail),
            ExportError::Engine(detail) => AppError::ExportEngine(detail),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::MalformedAiResponse(e) => {
                tracing::warn!("AI response extraction failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_AI_RESPONSE",
                    e.to_string(),
                )
            }
            AppError::AiResult(e) => {
                tracing::warn!("AI result validation failed: {e}");
                let code = match e {
                    ValidateError::MissingKeys(_) => "INCOMPLETE_AI_RESULT",
                    ValidateError::WrongType { .. } => "MALFORMED_AI_RESULT",
                };
                (StatusCode::BAD_GATEWAY, code, e.to_string())
            }
            AppError::TemplateNotFound(name) => (
                StatusCode::NOT_FOUND,
                "TEMPLATE_NOT_FOUND",
                format!("Template '{name}' not found"),
            ),
            AppError::TemplateRender(msg) => {
                tracing::error!("Template render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TEMPLATE_RENDER_ERROR",
                    msg.clone(),
                )
            }
            AppError::ExportRender(msg) => {
                tracing::error!("Export render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_RENDER_ERROR",
                    msg.clone(),
                )
            }
            AppError::ExportEngine(msg) => {
                tracing::error!("Export engine error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ENGINE_ERROR",
                    msg.clone(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
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
