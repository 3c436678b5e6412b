//! Editor and validation configuration

use serde::{Deserialize, Serialize};

use crate::error::FormsError;

/// Configuration for the form editor, renderer and validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Prefix of generated field ids
    pub custom_id_prefix: String,
    /// Label used when an option is appended without a value
    pub default_option_label: String,
    /// Placeholder options seeded into new choice fields
    pub placeholder_option_count: usize,
    /// Minimum password length accepted at submission
    pub password_min_length: usize,
    /// Validate email fields as soon as they lose focus
    pub eager_email_validation: bool,
    /// Enable number, date, url, password and choice-membership checks
    pub strict_type_checks: bool,
    /// First entry of every select control
    pub select_placeholder: String,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            custom_id_prefix: "custom".into(),
            default_option_label: "New Option".into(),
            placeholder_option_count: 3,
            password_min_length: 8,
            eager_email_validation: true,
            strict_type_checks: true,
            select_placeholder: "Select...".into(),
        }
    }
}

impl FormsConfig {
    /// Parse from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, FormsError> {
        serde_json::from_str(json).map_err(|e| FormsError::Config(e.to_string()))
    }
}
