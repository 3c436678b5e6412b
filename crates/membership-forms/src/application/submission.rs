//! Applicant-facing submission flow
//!
//! `Editing -> Validating -> Accepted`, falling back to `Editing` with the
//! error map attached when validation rejects, the intake collaborator fails,
//! or the submit is cancelled.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::dto::SubmitOutcome;
use crate::config::FormsConfig;
use crate::domain::aggregates::{FieldDefinition, FieldRegistry};
use crate::domain::services::{is_visible, PreviewRenderer, RenderMode, RenderedControl, SubmissionValidator};
use crate::domain::value_objects::{ErrorMap, FieldId, FieldType, FormValue, FormValueMap};
use crate::error::{FormsError, SchemaError};
use crate::ports::outbound::SubmissionGateway;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Editing,
    Validating,
    /// Terminal: handed to the intake collaborator
    Accepted { submission_id: String },
}

pub struct ApplicationForm {
    gateway: Arc<dyn SubmissionGateway>,
    fields: Vec<FieldDefinition>,
    values: FormValueMap,
    errors: ErrorMap,
    state: SubmissionState,
    validator: SubmissionValidator,
    renderer: PreviewRenderer,
    eager_email_validation: bool,
}

impl ApplicationForm {
    /// Start a blank application against a snapshot of `registry`
    pub fn new(registry: &FieldRegistry, gateway: Arc<dyn SubmissionGateway>) -> Self {
        let config: &FormsConfig = registry.config();
        Self {
            gateway,
            fields: registry.fields().to_vec(),
            values: FormValueMap::new(),
            errors: ErrorMap::new(),
            state: SubmissionState::Editing,
            validator: SubmissionValidator::from_config(config),
            renderer: PreviewRenderer::from_config(config),
            eager_email_validation: config.eager_email_validation,
        }
    }

    pub fn state(&self) -> &SubmissionState { &self.state }
    pub fn values(&self) -> &FormValueMap { &self.values }
    pub fn errors(&self) -> &ErrorMap { &self.errors }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    /// Swap in a newer schema.
    ///
    /// Answers for fields that became disabled are kept so they reappear on
    /// re-enable; they are excluded from the submitted payload while disabled.
    pub fn refresh_schema(&mut self, registry: &FieldRegistry) {
        self.fields = registry.fields().to_vec();
        let fields = &self.fields;
        self.errors
            .retain(|id, _| fields.iter().any(|f| &f.id == id && f.enabled));
    }

    /// Record a changed answer and clear that field's error
    pub fn set_value(&mut self, id: &str, value: impl Into<FormValue>) -> Result<(), SchemaError> {
        let field = self.enabled_field(id)?;
        let key = field.id.clone();

        if matches!(self.state, SubmissionState::Accepted { .. }) {
            tracing::warn!("Ignoring change to {} on an accepted application", id);
            return Ok(());
        }

        self.errors.remove(&key);
        self.values.insert(key, value.into());
        Ok(())
    }

    pub fn clear_value(&mut self, id: &str) -> Result<(), SchemaError> {
        let key = self.enabled_field(id)?.id.clone();
        if matches!(self.state, SubmissionState::Accepted { .. }) {
            return Ok(());
        }
        self.errors.remove(&key);
        self.values.remove(&key);
        Ok(())
    }

    /// Focus left field `id`. Email fields validate here when eager
    /// validation is on; every other kind waits for submit.
    pub fn blur(&mut self, id: &str) -> Result<Option<&str>, SchemaError> {
        let field = self.enabled_field(id)?;
        if !self.eager_email_validation || field.field_type != FieldType::Email {
            return Ok(self.error(id));
        }

        let key = field.id.clone();
        let message = match self.values.get(&key) {
            Some(value) if !value.is_empty() => self.validator.validate_field(field, Some(value)),
            // Empty-but-required waits for submit
            _ => None,
        };
        match message {
            Some(message) => {
                self.errors.insert(key, message);
            }
            None => {
                self.errors.remove(&key);
            }
        }
        Ok(self.error(id))
    }

    /// Controls for the current state, errors attached
    pub fn controls(&self) -> Result<Vec<RenderedControl>, SchemaError> {
        self.renderer
            .render_form(&self.fields, &self.values, &self.errors, RenderMode::LiveSubmission)
    }

    /// Validate and, when clean, hand the answers to the intake collaborator.
    ///
    /// Rejection, collaborator failure and cancellation all return to
    /// `Editing` with every answer preserved.
    pub async fn submit(&mut self, cancel: &CancellationToken) -> Result<SubmitOutcome, FormsError> {
        if let SubmissionState::Accepted { submission_id } = &self.state {
            return Ok(SubmitOutcome::Accepted { submission_id: submission_id.clone() });
        }

        self.state = SubmissionState::Validating;
        let errors = match self.validator.validate(&self.fields, &self.values) {
            Ok(errors) => errors,
            Err(e) => {
                self.state = SubmissionState::Editing;
                return Err(e.into());
            }
        };

        if !errors.is_empty() {
            self.state = SubmissionState::Editing;
            self.errors = errors.clone();
            return Ok(SubmitOutcome::Rejected { errors });
        }
        self.errors.clear();

        let payload = self.payload()?;
        let gateway = Arc::clone(&self.gateway);
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = gateway.submit_application(&payload) => Some(result),
        };

        match result {
            None => {
                self.state = SubmissionState::Editing;
                tracing::info!("Application submit cancelled");
                Ok(SubmitOutcome::Cancelled)
            }
            Some(Err(e)) => {
                self.state = SubmissionState::Editing;
                tracing::warn!("Application submit failed: {}", e);
                Err(e.into())
            }
            Some(Ok(submission_id)) => {
                tracing::info!("Application {} accepted with {} answers", submission_id, payload.len());
                self.state = SubmissionState::Accepted { submission_id: submission_id.clone() };
                Ok(SubmitOutcome::Accepted { submission_id })
            }
        }
    }

    /// Answers for enabled, visible fields only
    fn payload(&self) -> Result<FormValueMap, SchemaError> {
        let mut payload = FormValueMap::new();
        for (id, value) in &self.values {
            let enabled = self.fields.iter().any(|f| &f.id == id && f.enabled);
            if enabled && is_visible(&self.fields, &self.values, id.as_str())? {
                payload.insert(id.clone(), value.clone());
            }
        }
        Ok(payload)
    }

    fn enabled_field(&self, id: &str) -> Result<&FieldDefinition, SchemaError> {
        self.fields
            .iter()
            .find(|f| f.id.as_str() == id && f.enabled)
            .ok_or_else(|| SchemaError::FieldNotFound { id: FieldId::from(id) })
    }
}
