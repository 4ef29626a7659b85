use chrono::{DateTime, Utc};
use resume_style::StyleSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use super::resume::ResumeData;

pub const DEFAULT_USER_ID: &str = "anonymous";
pub const DEFAULT_RESUME_NAME: &str = "Untitled Resume";
pub const DEFAULT_TEMPLATE_ID: &str = "1";

/// Résumé identifier (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeId(Uuid);

impl ResumeId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from a path segment. Returns `None` for anything that is
    /// not a UUID, which callers treat as "not found".
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl fmt::Display for ResumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored résumé
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    #[schema(value_type = String, format = Uuid)]
    pub id: ResumeId,
    pub user_id: String,
    pub name: String,
    pub template_id: String,
    pub data: ResumeData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a résumé
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewResume {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub template_id: Option<String>,
    /// `None` means "start from the sample profile"
    pub data: Option<ResumeData>,
}

/// Validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumePatch {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub template_id: Option<String>,
    pub data: Option<ResumeData>,
}

impl ResumePatch {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.name.is_none()
            && self.template_id.is_none()
            && self.data.is_none()
    }
}

/// Per-template style override of one résumé
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeStyle {
    #[schema(value_type = String, format = Uuid)]
    pub resume_id: ResumeId,
    pub template_id: String,
    pub style: StyleSettings,
    pub updated_at: DateTime<Utc>,
}

impl ResumeStyle {
    pub fn new(resume_id: ResumeId, template_id: impl Into<String>, style: StyleSettings) -> Self {
        Self {
            resume_id,
            template_id: template_id.into(),
            style,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_id_parse() {
        let id = ResumeId::generate();
        assert_eq!(ResumeId::parse(&id.to_string()), Some(id));
        assert_eq!(ResumeId::parse("not-a-uuid"), None);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let now = Utc::now();
        let record = ResumeRecord {
            id: ResumeId::generate(),
            user_id: DEFAULT_USER_ID.into(),
            name: DEFAULT_RESUME_NAME.into(),
            template_id: DEFAULT_TEMPLATE_ID.into(),
            data: ResumeData::default(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "anonymous");
        assert_eq!(json["templateId"], "1");
        assert!(json["id"].is_string());
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ResumePatch::default().is_empty());
        let patch = ResumePatch {
            name: Some("CV".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
