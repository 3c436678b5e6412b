//! Error types for the membership form editor

use thiserror::Error;

use crate::domain::value_objects::FieldId;
use crate::ports::outbound::RepositoryError;

/// Schema integrity violations.
///
/// Raised at the point of an attempted registry mutation. The registry is
/// never modified when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field '{id}' is a system field and cannot be deleted")]
    SystemFieldProtected { id: FieldId },

    #[error("field id '{id}' cannot be changed")]
    IdImmutable { id: FieldId },

    #[error("duplicate field id: {id}")]
    DuplicateFieldId { id: FieldId },

    #[error("field not found: {id}")]
    FieldNotFound { id: FieldId },

    #[error("field '{field}' has a visibility rule referencing unknown field '{reference}'")]
    UnknownConditionalReference { field: FieldId, reference: FieldId },

    #[error("option index {index} out of range for field '{id}' ({len} options)")]
    OptionIndexOutOfRange { id: FieldId, index: usize, len: usize },

    #[error("field '{id}' is referenced by the visibility rule of '{by}'")]
    FieldReferenced { id: FieldId, by: FieldId },

    #[error("no order key left after {max}")]
    OrderExhausted { max: u32 },
}

/// Top-level error for the crate
#[derive(Error, Debug)]
pub enum FormsError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("collaborator error: {0}")]
    Collaborator(#[from] RepositoryError),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FormsError>;
