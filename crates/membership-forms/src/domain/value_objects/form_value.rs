//! Applicant-facing values and per-field error messages

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::FieldId;

/// A submitted value
///
/// A single string for text-like, date, select, radio and file kinds (a
/// filename for file), a list of strings for checkbox.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    Multi(Vec<String>),
}

impl FormValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Empty string or empty list
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Multi(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Multi(_) => None,
        }
    }

    /// Whether `item` is the value (single) or one of the values (list)
    pub fn contains(&self, item: &str) -> bool {
        match self {
            Self::Text(s) => s == item,
            Self::Multi(v) => v.iter().any(|s| s == item),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FormValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

/// Answers keyed by field id; only fields the applicant touched have keys
pub type FormValueMap = HashMap<FieldId, FormValue>;

/// Validation messages keyed by field id; a missing key means no error
pub type ErrorMap = BTreeMap<FieldId, String>;
