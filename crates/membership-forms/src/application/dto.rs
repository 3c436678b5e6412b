//! Outcomes returned to the UI layer

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::ErrorMap;

/// Result of an editor save; cancellation is neutral, not an error
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SaveOutcome {
    Saved { field_count: usize, saved_at: DateTime<Utc> },
    Cancelled,
}

/// Result of an applicant submit
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmitOutcome {
    Accepted { submission_id: String },
    Rejected { errors: ErrorMap },
    Cancelled,
}
