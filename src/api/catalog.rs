use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::{Preset, Template};
use crate::services::{PresetCatalog, TemplateCatalog};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PresetQuery {
    /// Only presets offered for this template
    pub template_id: Option<String>,
}

/// All résumé templates, in catalog order
#[utoipa::path(
    get,
    path = "/api/templates",
    responses((status = 200, description = "Template catalog", body = [Template])),
    tag = "Templates"
)]
pub async fn handle_list_templates(
    State(catalog): State<Arc<TemplateCatalog>>,
) -> Json<Vec<Template>> {
    Json(catalog.all().to_vec())
}

/// One template with its layout and default style
#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template id")),
    responses(
        (status = 200, description = "The template", body = Template),
        (status = 404, description = "Template not found"),
    ),
    tag = "Templates"
)]
pub async fn handle_get_template(
    State(catalog): State<Arc<TemplateCatalog>>,
    Path(id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::TemplateNotFound(id))
}

/// Color presets
#[utoipa::path(
    get,
    path = "/api/presets",
    params(PresetQuery),
    responses((status = 200, description = "Color presets", body = [Preset])),
    tag = "Templates"
)]
pub async fn handle_list_presets(
    State(presets): State<Arc<PresetCatalog>>,
    Query(query): Query<PresetQuery>,
) -> Json<Vec<Preset>> {
    let template_id = query.template_id.as_deref().filter(|t| !t.is_empty());
    Json(presets.list(template_id))
}
