//! Schema editor session
//!
//! Owns one registry from open until close. Edits stay in memory until an
//! explicit save; a cancelled or failed save leaves the registry untouched.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::application::dto::SaveOutcome;
use crate::config::FormsConfig;
use crate::domain::aggregates::{FieldDefinition, FieldRegistry};
use crate::domain::services::{group_by_category, CategoryGroup, PreviewRenderer, RenderMode, RenderedControl};
use crate::domain::value_objects::{ErrorMap, FormValueMap};
use crate::error::SchemaError;
use crate::infrastructure::seed::default_membership_form;
use crate::ports::outbound::{RepositoryError, SchemaRepository};

pub struct SchemaEditorSession {
    repository: Arc<dyn SchemaRepository>,
    registry: FieldRegistry,
    renderer: PreviewRenderer,
    // Last loaded or saved schema
    saved: Vec<FieldDefinition>,
}

impl SchemaEditorSession {
    /// Load the schema. A failed load leaves the session empty.
    pub async fn open(repository: Arc<dyn SchemaRepository>, config: FormsConfig) -> Self {
        Self::open_with_fallback(repository, config, Vec::new()).await
    }

    /// Load the schema, starting from the stock membership form when loading fails
    pub async fn open_or_seed(repository: Arc<dyn SchemaRepository>, config: FormsConfig) -> Self {
        Self::open_with_fallback(repository, config, default_membership_form()).await
    }

    async fn open_with_fallback(
        repository: Arc<dyn SchemaRepository>,
        config: FormsConfig,
        fallback: Vec<FieldDefinition>,
    ) -> Self {
        let loaded = match repository.load_field_definitions().await {
            Ok(fields) => FieldRegistry::from_fields(fields, config.clone()).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let registry = match loaded {
            Ok(registry) => {
                tracing::info!("Opened form editor with {} fields", registry.len());
                registry
            }
            Err(e) => {
                tracing::warn!("Failed to load form schema, starting from {} default fields: {}", fallback.len(), e);
                // The seed always loads; an empty registry otherwise
                FieldRegistry::from_fields(fallback, config.clone())
                    .unwrap_or_else(|_| FieldRegistry::new(config.clone()))
            }
        };

        Self {
            repository,
            renderer: PreviewRenderer::from_config(&config),
            saved: registry.fields().to_vec(),
            registry,
        }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Mutable access for edits; nothing is persisted until `save`
    pub fn registry_mut(&mut self) -> &mut FieldRegistry {
        &mut self.registry
    }

    /// Whether the registry differs from the last loaded/saved schema
    pub fn is_dirty(&self) -> bool {
        self.registry.fields() != self.saved.as_slice()
    }

    /// Drop every unsaved edit
    pub fn discard_changes(&mut self) {
        let config = self.registry.config().clone();
        self.registry = FieldRegistry::from_fields(self.saved.clone(), config.clone())
            .unwrap_or_else(|_| FieldRegistry::new(config));
        tracing::debug!("Discarded unsaved form edits");
    }

    /// Editor view: every category in display order, empty ones included
    pub fn groups(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(self.registry.fields(), true)
    }

    /// Applicant-eye preview of the enabled fields
    pub fn preview(&self, mode: RenderMode) -> Result<Vec<RenderedControl>, SchemaError> {
        self.renderer
            .render_form(self.registry.fields(), &FormValueMap::new(), &ErrorMap::new(), mode)
    }

    /// Persist the current registry.
    ///
    /// Cancelling `cancel` before the repository finishes drops the in-flight
    /// save and returns `SaveOutcome::Cancelled`; the registry and the saved
    /// snapshot stay as they were.
    pub async fn save(&mut self, cancel: &CancellationToken) -> Result<SaveOutcome, RepositoryError> {
        let snapshot = self.registry.fields().to_vec();
        let repository = Arc::clone(&self.repository);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = repository.save_field_definitions(&snapshot) => Some(result),
        };

        match result {
            None => {
                tracing::info!("Form schema save cancelled");
                Ok(SaveOutcome::Cancelled)
            }
            Some(Err(e)) => {
                tracing::warn!("Failed to save form schema: {}", e);
                Err(e)
            }
            Some(Ok(())) => {
                let events = self.registry.take_events();
                tracing::info!("Saved form schema: {} fields, {} edits", snapshot.len(), events.len());
                for event in &events {
                    tracing::debug!("Persisted {:?}", event);
                }
                let field_count = snapshot.len();
                self.saved = snapshot;
                Ok(SaveOutcome::Saved { field_count, saved_at: Utc::now() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Category, FieldType, ShowWhen};
    use crate::infrastructure::persistence::InMemorySchemaRepository;
    use async_trait::async_trait;

    /// Repository whose save never completes
    struct StalledRepository;

    #[async_trait]
    impl SchemaRepository for StalledRepository {
        async fn load_field_definitions(&self) -> Result<Vec<FieldDefinition>, RepositoryError> {
            Ok(default_membership_form())
        }

        async fn save_field_definitions(&self, _fields: &[FieldDefinition]) -> Result<(), RepositoryError> {
            std::future::pending().await
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl SchemaRepository for FailingRepository {
        async fn load_field_definitions(&self) -> Result<Vec<FieldDefinition>, RepositoryError> {
            Err(RepositoryError::Connection("sheet API unreachable".into()))
        }

        async fn save_field_definitions(&self, _fields: &[FieldDefinition]) -> Result<(), RepositoryError> {
            Err(RepositoryError::Connection("sheet API unreachable".into()))
        }
    }

    #[tokio::test]
    async fn test_failed_load_starts_empty() {
        let session = SchemaEditorSession::open(Arc::new(FailingRepository), FormsConfig::default()).await;
        assert!(session.registry().is_empty());
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_failed_load_can_fall_back_to_seed() {
        let session = SchemaEditorSession::open_or_seed(Arc::new(FailingRepository), FormsConfig::default()).await;
        assert_eq!(session.registry().len(), 38);
    }

    #[tokio::test]
    async fn test_dangling_rule_in_stored_schema_falls_back_to_seed() {
        let stored = vec![
            FieldDefinition::new("petName", "Pet name", FieldType::Text, Category::Personal, 1)
                .with_show_when(ShowWhen::checked("hasPet")),
        ];
        let repo = Arc::new(InMemorySchemaRepository::with_fields(stored));
        let session = SchemaEditorSession::open_or_seed(repo, FormsConfig::default()).await;

        assert_eq!(session.registry().len(), 38);
        assert!(!session.registry().contains("petName"));
        assert!(session.preview(RenderMode::LiveSubmission).is_ok());
    }

    #[tokio::test]
    async fn test_save_persists_edits() {
        let repo = Arc::new(InMemorySchemaRepository::with_fields(default_membership_form()));
        let mut session = SchemaEditorSession::open(repo.clone(), FormsConfig::default()).await;

        session.registry_mut().move_up("phone").unwrap();
        session.registry_mut().add(Category::Social, FieldType::Url).unwrap();
        assert!(session.is_dirty());

        let outcome = session.save(&CancellationToken::new()).await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved { field_count: 39, .. }));
        assert!(!session.is_dirty());
        assert_eq!(repo.stored().unwrap(), session.registry().fields());
    }

    #[tokio::test]
    async fn test_cancelled_save_leaves_state_alone() {
        let mut session = SchemaEditorSession::open(Arc::new(StalledRepository), FormsConfig::default()).await;
        session.registry_mut().toggle_enabled("gender").unwrap();
        let before = session.registry().fields().to_vec();

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move { trigger.cancel() });

        let outcome = session.save(&cancel).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Cancelled);
        assert_eq!(session.registry().fields(), before.as_slice());
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edits_for_retry() {
        let mut session = SchemaEditorSession::open(Arc::new(FailingRepository), FormsConfig::default()).await;
        session.registry_mut().add(Category::Personal, FieldType::Text).unwrap();

        let err = session.save(&CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection(_)));
        assert_eq!(session.registry().len(), 1);
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn test_discard_restores_last_saved() {
        let repo = Arc::new(InMemorySchemaRepository::with_fields(default_membership_form()));
        let mut session = SchemaEditorSession::open(repo, FormsConfig::default()).await;

        session.registry_mut().delete("preferredName").unwrap();
        session.discard_changes();
        assert!(session.registry().contains("preferredName"));
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_groups_and_preview() {
        let repo = Arc::new(InMemorySchemaRepository::with_fields(default_membership_form()));
        let session = SchemaEditorSession::open(repo, FormsConfig::default()).await;

        let groups = session.groups();
        assert_eq!(groups.len(), Category::ALL.len());
        assert_eq!(groups[0].title(), "Personal Information");

        let preview = session.preview(RenderMode::DisabledPreview).unwrap();
        assert!(preview.iter().all(|c| !c.interactive));
        // disabled fields and the conditional volunteer field are left out
        assert!(preview.iter().all(|c| c.field_id.as_str() != "ethnicity"));
        assert!(preview.iter().all(|c| c.field_id.as_str() != "volunteerDetails"));
    }
}
