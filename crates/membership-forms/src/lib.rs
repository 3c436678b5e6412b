//! Membership Form Schema Editor
//!
//! Administrative editor for the membership application form: a typed field
//! registry, per-category ordering, live preview rendering and applicant
//! submission validation. Persistence and application intake are delegated to
//! external collaborators through the outbound ports.
//!
//! ## Architecture
//!
//! - **Domain Layer**: field registry aggregate, value objects, domain events,
//!   ordering / grouping / visibility / rendering / validation services
//! - **Application Layer**: editor session and applicant form orchestration
//! - **Ports Layer**: schema repository and submission gateway interfaces
//! - **Infrastructure Layer**: in-memory and JSON file adapters, default seed
//!
//! ## Field Types
//!
//! text, textarea, email, phone, number, date, url, select, radio, checkbox,
//! file and password. Each kind has one rendering strategy and one validation
//! rule; there is no other place where a type is special-cased.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use application::{
    ApplicationForm, SaveOutcome, SchemaEditorSession, SubmissionState, SubmitOutcome,
};
pub use config::FormsConfig;
pub use domain::aggregates::{FieldChanges, FieldDefinition, FieldRegistry};
pub use domain::events::{DomainEvent, RegistryEvent};
pub use domain::services::{
    group_by_category, is_visible, CategoryGroup, Direction, PreviewRenderer, RenderMode,
    RenderedControl, SubmissionValidator, Widget,
};
pub use domain::value_objects::{
    Category, Condition, ErrorMap, FieldId, FieldType, FormValue, FormValueMap, ShowWhen,
};
pub use error::{FormsError, Result, SchemaError};
pub use infrastructure::{
    default_membership_form, InMemorySchemaRepository, InMemorySubmissionGateway,
    JsonFileSchemaRepository,
};
pub use ports::outbound::{RepositoryError, SchemaRepository, SubmissionGateway};
