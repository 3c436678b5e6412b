//! Repository and gateway implementations

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::domain::aggregates::FieldDefinition;
use crate::domain::value_objects::FormValueMap;
use crate::ports::outbound::{RepositoryError, SchemaRepository, SubmissionGateway};

/// In-memory schema repository (for testing and development)
#[derive(Default)]
pub struct InMemorySchemaRepository {
    fields: RwLock<Option<Vec<FieldDefinition>>>,
}

impl InMemorySchemaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: Vec<FieldDefinition>) -> Self {
        Self { fields: RwLock::new(Some(fields)) }
    }

    /// Currently stored schema, if any
    pub fn stored(&self) -> Option<Vec<FieldDefinition>> {
        self.fields.read().clone()
    }
}

#[async_trait]
impl SchemaRepository for InMemorySchemaRepository {
    async fn load_field_definitions(&self) -> Result<Vec<FieldDefinition>, RepositoryError> {
        self.fields.read().clone().ok_or(RepositoryError::NotFound)
    }

    async fn save_field_definitions(&self, fields: &[FieldDefinition]) -> Result<(), RepositoryError> {
        *self.fields.write() = Some(fields.to_vec());
        Ok(())
    }
}

/// Schema stored as a pretty-printed JSON array on disk
pub struct JsonFileSchemaRepository {
    path: PathBuf,
}

impl JsonFileSchemaRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SchemaRepository for JsonFileSchemaRepository {
    async fn load_field_definitions(&self) -> Result<Vec<FieldDefinition>, RepositoryError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(RepositoryError::NotFound),
            Err(e) => return Err(RepositoryError::Io(e.to_string())),
        };
        serde_json::from_str(&raw).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    async fn save_field_definitions(&self, fields: &[FieldDefinition]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(fields)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        // Write a sibling file, then rename over the target
        let tmp = TempFileGuard::new(self.path.with_extension("json.tmp"));
        tokio::fs::write(tmp.path(), json)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))?;
        tokio::fs::rename(tmp.path(), &self.path)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))?;
        tmp.persisted();

        tracing::debug!("Wrote {} field definitions to {}", fields.len(), self.path.display());
        Ok(())
    }
}

/// Removes the temp file on drop unless it was renamed into place.
/// Runs on error returns and when a cancelled save future is dropped.
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn persisted(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed stale {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}

/// Submission accepted by the in-memory gateway
#[derive(Clone, Debug)]
pub struct StoredSubmission {
    pub id: String,
    pub values: FormValueMap,
    pub submitted_at: DateTime<Utc>,
}

/// In-memory intake gateway (for testing and development)
#[derive(Default)]
pub struct InMemorySubmissionGateway {
    submissions: DashMap<String, StoredSubmission>,
}

impl InMemorySubmissionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<StoredSubmission> {
        self.submissions.get(id).map(|s| s.value().clone())
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

#[async_trait]
impl SubmissionGateway for InMemorySubmissionGateway {
    async fn submit_application(&self, values: &FormValueMap) -> Result<String, RepositoryError> {
        let id = uuid::Uuid::new_v4().to_string();
        self.submissions.insert(
            id.clone(),
            StoredSubmission { id: id.clone(), values: values.clone(), submitted_at: Utc::now() },
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Category, FieldType, FormValue, ShowWhen};

    fn schema() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("email", "Email Address", FieldType::Email, Category::Contact, 1)
                .required()
                .system(),
            FieldDefinition::new("interests", "Interests", FieldType::Checkbox, Category::Organization, 2)
                .with_options(["Leadership", "Service"]),
            FieldDefinition::new("details", "Details", FieldType::Textarea, Category::Organization, 3)
                .with_show_when(ShowWhen::equals("interests", "Service")),
        ]
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let repo = InMemorySchemaRepository::new();
        assert_eq!(repo.load_field_definitions().await, Err(RepositoryError::NotFound));

        repo.save_field_definitions(&schema()).await.unwrap();
        assert_eq!(repo.load_field_definitions().await.unwrap(), schema());
    }

    #[tokio::test]
    async fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileSchemaRepository::new(dir.path().join("membership-form.json"));

        assert_eq!(repo.load_field_definitions().await, Err(RepositoryError::NotFound));
        repo.save_field_definitions(&schema()).await.unwrap();
        assert_eq!(repo.load_field_definitions().await.unwrap(), schema());
        assert!(!dir.path().join("membership-form.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        // a directory in the target's place makes the rename fail
        tokio::fs::create_dir(&path).await.unwrap();

        let repo = JsonFileSchemaRepository::new(&path);
        assert!(matches!(
            repo.save_field_definitions(&schema()).await,
            Err(RepositoryError::Io(_))
        ));
        assert!(!dir.path().join("schema.json.tmp").exists());
    }

    #[test]
    fn test_dropped_temp_guard_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("schema.json.tmp");
        std::fs::write(&tmp, "[]").unwrap();

        drop(TempFileGuard::new(tmp.clone()));
        assert!(!tmp.exists());

        std::fs::write(&tmp, "[]").unwrap();
        TempFileGuard::new(tmp.clone()).persisted();
        assert!(tmp.exists());
    }

    #[tokio::test]
    async fn test_json_file_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let repo = JsonFileSchemaRepository::new(&path);
        assert!(matches!(
            repo.load_field_definitions().await,
            Err(RepositoryError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_gateway_stores_submission() {
        let gateway = InMemorySubmissionGateway::new();
        let mut values = FormValueMap::new();
        values.insert("email".into(), FormValue::text("member@chapter.org"));

        let id = gateway.submit_application(&values).await.unwrap();
        let stored = gateway.get(&id).unwrap();
        assert_eq!(stored.values, values);
        assert_eq!(gateway.len(), 1);
    }
}
