//! Infrastructure layer
//!
//! Concrete adapters for the outbound ports and the stock membership schema.

pub mod persistence;
pub mod seed;

pub use persistence::{InMemorySchemaRepository, InMemorySubmissionGateway, JsonFileSchemaRepository, StoredSubmission};
pub use seed::default_membership_form;
