use crate::error::ApiError;
use crate::models::{
    NewResume, ResumeData, ResumeId, ResumePatch, ResumeRecord, ResumeStyle,
    DEFAULT_RESUME_NAME, DEFAULT_TEMPLATE_ID, DEFAULT_USER_ID,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Trait for résumé persistence
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Create a record with a fresh id
    async fn create(&self, new: NewResume) -> Result<ResumeRecord, ApiError>;

    async fn get(&self, id: &ResumeId) -> Result<Option<ResumeRecord>, ApiError>;

    /// All records of a user, oldest first
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ResumeRecord>, ApiError>;

    /// Shallow update. Returns `None` when the record does not exist.
    async fn update(
        &self,
        id: &ResumeId,
        patch: ResumePatch,
    ) -> Result<Option<ResumeRecord>, ApiError>;

    /// Delete a record and its style overrides
    async fn delete(&self, id: &ResumeId) -> Result<bool, ApiError>;

    async fn get_style(
        &self,
        id: &ResumeId,
        template_id: &str,
    ) -> Result<Option<ResumeStyle>, ApiError>;

    /// Upsert a style override. Returns `None` when the résumé does not exist.
    async fn save_style(&self, style: ResumeStyle) -> Result<Option<ResumeStyle>, ApiError>;

    async fn delete_style(&self, id: &ResumeId, template_id: &str) -> Result<bool, ApiError>;
}

#[derive(Default)]
struct Tables {
    resumes: HashMap<ResumeId, ResumeRecord>,
    styles: HashMap<(ResumeId, String), ResumeStyle>,
}

/// In-memory résumé storage
///
/// Both tables sit behind one lock so a delete and its cascade are atomic.
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResumeStore for InMemoryStore {
    async fn create(&self, new: NewResume) -> Result<ResumeRecord, ApiError> {
        let now = Utc::now();
        let record = ResumeRecord {
            id: ResumeId::generate(),
            user_id: new.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            name: new.name.unwrap_or_else(|| DEFAULT_RESUME_NAME.to_string()),
            template_id: new
                .template_id
                .unwrap_or_else(|| DEFAULT_TEMPLATE_ID.to_string()),
            data: new.data.unwrap_or_else(ResumeData::sample),
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.tables.write().await;
        tables.resumes.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: &ResumeId) -> Result<Option<ResumeRecord>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.resumes.get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ResumeRecord>, ApiError> {
        let tables = self.tables.read().await;
        let mut records: Vec<ResumeRecord> = tables
            .resumes
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn update(
        &self,
        id: &ResumeId,
        patch: ResumePatch,
    ) -> Result<Option<ResumeRecord>, ApiError> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.resumes.get_mut(id) else {
            return Ok(None);
        };

        if let Some(user_id) = patch.user_id {
            record.user_id = user_id;
        }
        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(template_id) = patch.template_id {
            record.template_id = template_id;
        }
        if let Some(data) = patch.data {
            record.data = data;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &ResumeId) -> Result<bool, ApiError> {
        let mut tables = self.tables.write().await;
        let removed = tables.resumes.remove(id).is_some();
        if removed {
            tables.styles.retain(|(resume_id, _), _| resume_id != id);
        }
        Ok(removed)
    }

    async fn get_style(
        &self,
        id: &ResumeId,
        template_id: &str,
    ) -> Result<Option<ResumeStyle>, ApiError> {
        let tables = self.tables.read().await;
        Ok(tables.styles.get(&(*id, template_id.to_string())).cloned())
    }

    async fn save_style(&self, style: ResumeStyle) -> Result<Option<ResumeStyle>, ApiError> {
        let mut tables = self.tables.write().await;
        if !tables.resumes.contains_key(&style.resume_id) {
            return Ok(None);
        }
        tables
            .styles
            .insert((style.resume_id, style.template_id.clone()), style.clone());
        Ok(Some(style))
    }

    async fn delete_style(&self, id: &ResumeId, template_id: &str) -> Result<bool, ApiError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .styles
            .remove(&(*id, template_id.to_string()))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_style::StyleSettings;

    fn minimal_data() -> ResumeData {
        ResumeData {
            name: "Ada Lovelace".into(),
            skills: vec!["Mathematics".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let store = InMemoryStore::new();
        let record = store.create(NewResume::default()).await.unwrap();

        assert_eq!(record.user_id, "anonymous");
        assert_eq!(record.name, "Untitled Resume");
        assert_eq!(record.template_id, "1");
        assert_eq!(record.data, ResumeData::sample());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_data() {
        let store = InMemoryStore::new();
        let record = store
            .create(NewResume {
                data: Some(minimal_data()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(record.data, minimal_data());
        let found = store.get(&record.id).await.unwrap().unwrap();
        assert_eq!(found.data.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_update_is_shallow() {
        let store = InMemoryStore::new();
        let record = store
            .create(NewResume {
                name: Some("My CV".into()),
                template_id: Some("7".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = store
            .update(
                &record.id,
                ResumePatch {
                    data: Some(minimal_data()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.data, minimal_data());
        assert_eq!(updated.name, "My CV");
        assert_eq!(updated.template_id, "7");
        assert_eq!(updated.user_id, "anonymous");
        assert_eq!(updated.created_at, record.created_at);
        assert!(updated.updated_at >= record.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = InMemoryStore::new();
        let result = store
            .update(&ResumeId::generate(), ResumePatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_by_user_filters_and_orders() {
        let store = InMemoryStore::new();
        let mut ids = Vec::new();
        for name in ["first", "second", "third"] {
            let record = store
                .create(NewResume {
                    user_id: Some("u1".into()),
                    name: Some(name.into()),
                    ..Default::default()
                })
                .await
                .unwrap();
            ids.push(record.id);
        }
        store
            .create(NewResume {
                user_id: Some("u2".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let listed = store.list_by_user("u1").await.unwrap();
        assert_eq!(listed.len(), 3);
        for pair in listed.windows(2) {
            assert!(
                (pair[0].created_at, pair[0].id) < (pair[1].created_at, pair[1].id),
                "records must be ordered by creation"
            );
        }
        assert!(store.list_by_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_style_overrides_and_cascade() {
        let store = InMemoryStore::new();
        let record = store.create(NewResume::default()).await.unwrap();

        let mut style = StyleSettings::default();
        style.body_font_size = 14.0;
        let saved = store
            .save_style(ResumeStyle::new(record.id, "3", style.clone()))
            .await
            .unwrap();
        assert!(saved.is_some());

        let found = store.get_style(&record.id, "3").await.unwrap().unwrap();
        assert_eq!(found.style, style);
        assert!(store.get_style(&record.id, "4").await.unwrap().is_none());

        assert!(store.delete(&record.id).await.unwrap());
        assert!(store.get_style(&record.id, "3").await.unwrap().is_none());
        assert!(!store.delete(&record.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_save_style_for_missing_resume() {
        let store = InMemoryStore::new();
        let result = store
            .save_style(ResumeStyle::new(
                ResumeId::generate(),
                "1",
                StyleSettings::default(),
            ))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_style() {
        let store = InMemoryStore::new();
        let record = store.create(NewResume::default()).await.unwrap();
        store
            .save_style(ResumeStyle::new(record.id, "1", StyleSettings::default()))
            .await
            .unwrap();

        assert!(store.delete_style(&record.id, "1").await.unwrap());
        assert!(!store.delete_style(&record.id, "1").await.unwrap());
    }
}
