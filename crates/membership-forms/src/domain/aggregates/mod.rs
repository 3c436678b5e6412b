//! Aggregates module

pub mod field_definition;
pub mod registry;

pub use field_definition::{FieldChanges, FieldDefinition};
pub use registry::FieldRegistry;
