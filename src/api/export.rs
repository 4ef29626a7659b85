use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use super::body::JsonBody;
use crate::error::ApiError;
use crate::services::PdfExporter;

/// Generate a PDF
///
/// Body: `{resumeData, styleSettings, templateId}`. Everything is validated
/// strictly; styles out of range are rejected. Unknown template ids render
/// with the default template.
#[utoipa::path(
    post,
    path = "/api/generate-pdf",
    request_body(content = serde_json::Value, description = "resumeData, styleSettings (optional) and templateId"),
    responses(
        (status = 200, description = "A4 PDF document", content_type = "application/pdf"),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "PDF engine failure"),
    ),
    tag = "Export"
)]
pub async fn handle_generate_pdf(
    State(exporter): State<Arc<PdfExporter>>,
    JsonBody(raw): JsonBody,
) -> Result<Response, ApiError> {
    let document = exporter.export(&raw).await?;

    tracing::info!(
        filename = %document.filename,
        bytes = document.bytes.len(),
        "PDF export served"
    );

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, document.content_disposition()),
        ],
        document.bytes,
    )
        .into_response())
}

/// Render the HTML that would be printed
///
/// Same body as `/api/generate-pdf`. Style values out of range fall back to
/// their defaults instead of being rejected.
#[utoipa::path(
    post,
    path = "/api/preview",
    request_body(content = serde_json::Value, description = "resumeData, styleSettings (optional) and templateId"),
    responses(
        (status = 200, description = "Rendered résumé", content_type = "text/html"),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Export"
)]
pub async fn handle_preview(
    State(exporter): State<Arc<PdfExporter>>,
    JsonBody(raw): JsonBody,
) -> Result<Html<String>, ApiError> {
    let markup = exporter.preview(&raw)?;
    tracing::debug!(template_id = %markup.template_id, "Preview rendered");
    Ok(Html(markup.into_string()))
}
