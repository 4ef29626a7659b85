use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::models::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Resume not found")]
    ResumeNotFound,

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Style not found")]
    StyleNotFound,

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

/// Failures of the headless browser PDF engine
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Browser binary not found (set CHROME_PATH or install chromium)")]
    BrowserNotFound,

    #[error("Failed to start browser: {0}")]
    Spawn(std::io::Error),

    #[error("Browser exited with {status}: {stderr}")]
    BrowserFailed { status: String, stderr: String },

    #[error("Render timed out after {0:?}")]
    Timeout(Duration),

    #[error("No browser slot available after {0:?}")]
    PoolExhausted(Duration),

    #[error("Browser output is not a PDF ({0} bytes)")]
    InvalidOutput(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures turning a résumé into markup
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a PDF export or preview request
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Validation(e) => ApiError::Validation(e),
            ExportError::Template(e) => ApiError::Template(e),
            ExportError::Render(e) => ApiError::Render(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(e) => {
                let body = Json(json!({
                    "status": StatusCode::BAD_REQUEST.as_u16(),
                    "error": "Validation failed",
                    "errors": e.issues,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ApiError::ResumeNotFound
            | ApiError::TemplateNotFound(_)
            | ApiError::StyleNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Render(e) => {
                tracing::error!(error = %e, "PDF rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate PDF".to_string(),
                )
            }
            ApiError::Template(e) => {
                tracing::error!(error = %e, "Markup rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render resume".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
