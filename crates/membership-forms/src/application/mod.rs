//! Application layer
//!
//! Orchestrates the registry, renderer and validator against the outbound
//! ports.

pub mod dto;
pub mod editor;
pub mod submission;

pub use dto::{SaveOutcome, SubmitOutcome};
pub use editor::SchemaEditorSession;
pub use submission::{ApplicationForm, SubmissionState};
