use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use resume_style::{validate_style, StyleSettings, Validation};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use utoipa::IntoParams;

use super::body::JsonBody;
use crate::error::ApiError;
use crate::models::{
    validate_resume_data, NewResume, ResumeData, ResumeId, ResumePatch, ResumeRecord, ResumeStyle,
    ValidationError, DEFAULT_USER_ID,
};
use crate::services::{ResumeStore, TemplateCatalog};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Owner of the résumés (default: "anonymous")
    pub user_id: Option<String>,
}

/// Top-level fields of a create or update body
#[derive(Debug)]
struct RecordFields {
    user_id: Option<String>,
    name: Option<String>,
    template_id: Option<String>,
    data: Option<ResumeData>,
    style: Option<StyleSettings>,
}

fn optional_string(
    obj: &Map<String, Value>,
    key: &str,
    issues: &mut Vec<ValidationError>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            issues.push(ValidationError::single(key, "must be a string"));
            None
        }
    }
}

/// Validate a partial résumé record.
///
/// `data` is validated strictly when present, and so is `style`. A
/// `templateId` must name a catalog template, since a `style` is stored
/// under it.
fn parse_record_fields(
    raw: &Value,
    catalog: &TemplateCatalog,
) -> Result<RecordFields, ValidationError> {
    let empty = Map::new();
    let obj = match raw {
        Value::Null => &empty,
        Value::Object(obj) => obj,
        _ => return Err(ValidationError::single("", "request body must be a JSON object")),
    };

    let mut issues = Vec::new();
    let user_id = optional_string(obj, "userId", &mut issues);
    let name = optional_string(obj, "name", &mut issues);
    let template_id = optional_string(obj, "templateId", &mut issues);
    if let Some(id) = template_id.as_deref() {
        if !catalog.contains(id) {
            issues.push(ValidationError::single(
                "templateId",
                format!("unknown template \"{id}\""),
            ));
        }
    }

    let data = match obj.get("data") {
        None | Some(Value::Null) => None,
        Some(raw_data) => match validate_resume_data(raw_data) {
            Ok(data) => Some(data),
            Err(e) => {
                issues.push(e.prefixed("data"));
                None
            }
        },
    };

    let style = match obj.get("style") {
        None | Some(Value::Null) => None,
        Some(raw_style) => match validate_style(raw_style, Validation::Strict) {
            Ok(style) => Some(style),
            Err(e) => {
                issues.push(ValidationError::from_style(e, "style"));
                None
            }
        },
    };

    match issues.into_iter().reduce(ValidationError::merge) {
        Some(err) => Err(err),
        None => Ok(RecordFields {
            user_id,
            name,
            template_id,
            data,
            style,
        }),
    }
}

fn parse_id(raw: &str) -> Result<ResumeId, ApiError> {
    ResumeId::parse(raw).ok_or(ApiError::ResumeNotFound)
}

/// List a user's résumés, oldest first
#[utoipa::path(
    get,
    path = "/api/resumes",
    params(ListQuery),
    responses(
        (status = 200, description = "Résumés of the user", body = [ResumeRecord]),
    ),
    tag = "Resumes"
)]
pub async fn handle_list_resumes<R: ResumeStore>(
    State(store): State<Arc<R>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ResumeRecord>>, ApiError> {
    let user_id = query
        .user_id
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

    let records = store.list_by_user(&user_id).await?;
    tracing::debug!(user_id = %user_id, count = records.len(), "Listed resumes");
    Ok(Json(records))
}

/// Fetch one résumé
#[utoipa::path(
    get,
    path = "/api/resumes/{id}",
    params(("id" = String, Path, description = "Résumé id (UUID)")),
    responses(
        (status = 200, description = "The résumé", body = ResumeRecord),
        (status = 404, description = "Résumé not found"),
    ),
    tag = "Resumes"
)]
pub async fn handle_get_resume<R: ResumeStore>(
    State(store): State<Arc<R>>,
    Path(id): Path<String>,
) -> Result<Json<ResumeRecord>, ApiError> {
    let id = parse_id(&id)?;
    store
        .get(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::ResumeNotFound)
}

/// Create a résumé
///
/// Every field is optional. Without `data` the record starts from a sample
/// profile. A `style` is stored as the override for the record's template.
#[utoipa::path(
    post,
    path = "/api/resumes",
    request_body(content = serde_json::Value, description = "Partial résumé record: userId, name, templateId, data, style"),
    responses(
        (status = 201, description = "Résumé created", body = ResumeRecord),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Resumes"
)]
pub async fn handle_create_resume<R: ResumeStore>(
    State(store): State<Arc<R>>,
    State(catalog): State<Arc<TemplateCatalog>>,
    JsonBody(raw): JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    let fields = parse_record_fields(&raw, &catalog)?;

    let record = store
        .create(NewResume {
            user_id: fields.user_id,
            name: fields.name,
            template_id: fields.template_id,
            data: fields.data,
        })
        .await?;

    if let Some(style) = fields.style {
        store
            .save_style(ResumeStyle::new(record.id, record.template_id.clone(), style))
            .await?;
    }

    tracing::info!(
        resume_id = %record.id,
        user_id = %record.user_id,
        template_id = %record.template_id,
        "Resume created"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// Update top-level fields of a résumé
///
/// Fields that are absent stay as they are. `data` is replaced as a whole.
#[utoipa::path(
    patch,
    path = "/api/resumes/{id}",
    params(("id" = String, Path, description = "Résumé id (UUID)")),
    request_body(content = serde_json::Value, description = "Partial résumé record: userId, name, templateId, data, style"),
    responses(
        (status = 200, description = "Updated résumé", body = ResumeRecord),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Résumé not found"),
    ),
    tag = "Resumes"
)]
pub async fn handle_update_resume<R: ResumeStore>(
    State(store): State<Arc<R>>,
    State(catalog): State<Arc<TemplateCatalog>>,
    Path(id): Path<String>,
    JsonBody(raw): JsonBody,
) -> Result<Json<ResumeRecord>, ApiError> {
    let id = parse_id(&id)?;
    let fields = parse_record_fields(&raw, &catalog)?;

    let patch = ResumePatch {
        user_id: fields.user_id,
        name: fields.name,
        template_id: fields.template_id,
        data: fields.data,
    };

    let record = if patch.is_empty() {
        store.get(&id).await?
    } else {
        store.update(&id, patch).await?
    }
    .ok_or(ApiError::ResumeNotFound)?;

    if let Some(style) = fields.style {
        store
            .save_style(ResumeStyle::new(record.id, record.template_id.clone(), style))
            .await?;
    }

    tracing::info!(resume_id = %record.id, "Resume updated");
    Ok(Json(record))
}

/// Delete a résumé and its style overrides
#[utoipa::path(
    delete,
    path = "/api/resumes/{id}",
    params(("id" = String, Path, description = "Résumé id (UUID)")),
    responses(
        (status = 204, description = "Résumé deleted"),
        (status = 404, description = "Résumé not found"),
    ),
    tag = "Resumes"
)]
pub async fn handle_delete_resume<R: ResumeStore>(
    State(store): State<Arc<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if store.delete(&id).await? {
        tracing::info!(resume_id = %id, "Resume deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::ResumeNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLoader;
    use crate::models::AppConfig;
    use serde_json::json;

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::from_config(&AppConfig::load_from_assets(&AssetLoader::new(None, None)))
    }

    #[test]
    fn test_parse_empty_body() {
        let fields = parse_record_fields(&Value::Null, &catalog()).unwrap();
        assert!(fields.user_id.is_none());
        assert!(fields.data.is_none());
        assert!(fields.style.is_none());
    }

    #[test]
    fn test_parse_full_body() {
        let raw = json!({
            "userId": "u1",
            "name": "My CV",
            "templateId": "5",
            "data": { "name": "Jane", "experience": [], "education": [], "skills": [] },
            "style": { "headerFontSize": 20 }
        });
        let fields = parse_record_fields(&raw, &catalog()).unwrap();
        assert_eq!(fields.user_id.as_deref(), Some("u1"));
        assert_eq!(fields.name.as_deref(), Some("My CV"));
        assert_eq!(fields.template_id.as_deref(), Some("5"));
        assert_eq!(fields.data.unwrap().name, "Jane");
        assert_eq!(fields.style.unwrap().header_font_size, 20.0);
    }

    #[test]
    fn test_parse_reports_every_field() {
        let raw = json!({
            "userId": 5,
            "data": { "experience": [], "education": [], "skills": [] },
            "style": { "lineHeight": 3 }
        });
        let err = parse_record_fields(&raw, &catalog()).unwrap_err();
        assert_eq!(err.paths(), vec!["userId", "data.name", "style.lineHeight"]);
    }

    #[test]
    fn test_parse_rejects_unknown_template() {
        let raw = json!({ "templateId": "999", "style": { "bodyFontSize": 14 } });
        let err = parse_record_fields(&raw, &catalog()).unwrap_err();
        assert_eq!(err.paths(), vec!["templateId"]);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = parse_record_fields(&json!("hello"), &catalog()).unwrap_err();
        assert_eq!(err.paths(), vec![""]);
    }

    #[test]
    fn test_parse_id() {
        assert!(matches!(parse_id("nope"), Err(ApiError::ResumeNotFound)));
        let id = ResumeId::generate();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
