//! Outbound ports
//!
//! Hexagonal architecture: the collaborators the editor and the applicant form
//! call out to. Callers race these futures against a cancellation token, so
//! implementations must not leave partial state behind when dropped mid-call.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::FieldDefinition;
use crate::domain::value_objects::FormValueMap;

/// Schema persistence port
#[async_trait]
pub trait SchemaRepository: Send + Sync {
    /// Load the stored field definitions
    async fn load_field_definitions(&self) -> Result<Vec<FieldDefinition>, RepositoryError>;

    /// Replace the stored field definitions
    async fn save_field_definitions(&self, fields: &[FieldDefinition]) -> Result<(), RepositoryError>;
}

/// Application intake port
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Hand over an accepted submission; returns the collaborator's submission id
    async fn submit_application(&self, values: &FormValueMap) -> Result<String, RepositoryError>;
}

/// Collaborator round-trip failure. Always recoverable: callers keep their
/// in-memory state so the user can retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("schema not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("rejected by collaborator: {0}")]
    Rejected(String),
}
