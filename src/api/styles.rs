use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use resume_style::{validate_style, StyleSettings, Validation};
use std::sync::Arc;

use super::body::JsonBody;
use crate::error::ApiError;
use crate::models::{ResumeId, ResumeStyle, Template, ValidationError};
use crate::services::{ResumeStore, TemplateCatalog};

/// Resolve both path segments, or fail with the matching 404
async fn lookup<'a, R: ResumeStore>(
    store: &R,
    catalog: &'a TemplateCatalog,
    id: &str,
    template_id: &str,
) -> Result<(ResumeId, &'a Template), ApiError> {
    let id = ResumeId::parse(id).ok_or(ApiError::ResumeNotFound)?;
    if store.get(&id).await?.is_none() {
        return Err(ApiError::ResumeNotFound);
    }
    let template = catalog
        .get(template_id)
        .ok_or_else(|| ApiError::TemplateNotFound(template_id.to_string()))?;
    Ok((id, template))
}

/// Style of a résumé for one template
///
/// Returns the saved override, or the template's default style.
#[utoipa::path(
    get,
    path = "/api/resumes/{id}/styles/{template_id}",
    params(
        ("id" = String, Path, description = "Résumé id (UUID)"),
        ("template_id" = String, Path, description = "Template id"),
    ),
    responses(
        (status = 200, description = "Effective style", body = StyleSettings),
        (status = 404, description = "Résumé or template not found"),
    ),
    tag = "Styles"
)]
pub async fn handle_get_style<R: ResumeStore>(
    State(store): State<Arc<R>>,
    State(catalog): State<Arc<TemplateCatalog>>,
    Path((id, template_id)): Path<(String, String)>,
) -> Result<Json<StyleSettings>, ApiError> {
    let (id, template) = lookup(store.as_ref(), &catalog, &id, &template_id).await?;

    let style = match store.get_style(&id, &template.id).await? {
        Some(saved) => saved.style,
        None => template.default_style.clone(),
    };
    Ok(Json(style))
}

/// Save a style override for one template
///
/// Every value is range-checked; out-of-range values are rejected.
#[utoipa::path(
    post,
    path = "/api/resumes/{id}/styles/{template_id}",
    params(
        ("id" = String, Path, description = "Résumé id (UUID)"),
        ("template_id" = String, Path, description = "Template id"),
    ),
    request_body = StyleSettings,
    responses(
        (status = 200, description = "Saved override", body = ResumeStyle),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Résumé or template not found"),
    ),
    tag = "Styles"
)]
pub async fn handle_save_style<R: ResumeStore>(
    State(store): State<Arc<R>>,
    State(catalog): State<Arc<TemplateCatalog>>,
    Path((id, template_id)): Path<(String, String)>,
    JsonBody(raw): JsonBody,
) -> Result<Json<ResumeStyle>, ApiError> {
    let (id, template) = lookup(store.as_ref(), &catalog, &id, &template_id).await?;

    if raw.is_null() {
        return Err(ValidationError::single("", "request body must be a JSON object").into());
    }
    let style = validate_style(&raw, Validation::Strict)
        .map_err(|e| ValidationError::from_style(e, ""))?;

    let saved = store
        .save_style(ResumeStyle::new(id, template.id.clone(), style))
        .await?
        .ok_or(ApiError::ResumeNotFound)?;

    tracing::info!(resume_id = %id, template_id = %template.id, "Style override saved");
    Ok(Json(saved))
}

/// Drop a style override, reverting to the template default
#[utoipa::path(
    delete,
    path = "/api/resumes/{id}/styles/{template_id}",
    params(
        ("id" = String, Path, description = "Résumé id (UUID)"),
        ("template_id" = String, Path, description = "Template id"),
    ),
    responses(
        (status = 204, description = "Override removed"),
        (status = 404, description = "Résumé, template or override not found"),
    ),
    tag = "Styles"
)]
pub async fn handle_delete_style<R: ResumeStore>(
    State(store): State<Arc<R>>,
    State(catalog): State<Arc<TemplateCatalog>>,
    Path((id, template_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let (id, template) = lookup(store.as_ref(), &catalog, &id, &template_id).await?;

    if store.delete_style(&id, &template.id).await? {
        tracing::info!(resume_id = %id, template_id = %template.id, "Style override deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::StyleNotFound)
    }
}
