//! Submission Validator
//!
//! Produces an `ErrorMap` for a value map; an empty map means accept. Bad
//! data never raises: only a broken schema (a visibility rule pointing at an
//! unknown field) returns `Err`.

use chrono::NaiveDate;

use crate::config::FormsConfig;
use crate::domain::aggregates::FieldDefinition;
use crate::domain::value_objects::{Email, ErrorMap, FieldType, FormValue, FormValueMap};
use crate::error::SchemaError;

use super::visibility::is_visible;

#[derive(Clone, Debug)]
pub struct SubmissionValidator {
    password_min_length: usize,
    strict_type_checks: bool,
}

impl Default for SubmissionValidator {
    fn default() -> Self {
        Self::from_config(&FormsConfig::default())
    }
}

impl SubmissionValidator {
    pub fn from_config(config: &FormsConfig) -> Self {
        Self {
            password_min_length: config.password_min_length,
            strict_type_checks: config.strict_type_checks,
        }
    }

    /// Validate `values` against every enabled, visible field in `fields`.
    ///
    /// Disabled fields are skipped entirely, as are fields hidden by their
    /// visibility rule.
    pub fn validate(
        &self,
        fields: &[FieldDefinition],
        values: &FormValueMap,
    ) -> Result<ErrorMap, SchemaError> {
        let mut errors = ErrorMap::new();

        for field in fields.iter().filter(|f| f.enabled) {
            if !is_visible(fields, values, field.id.as_str())? {
                continue;
            }
            if let Some(message) = self.validate_field(field, values.get(&field.id)) {
                errors.insert(field.id.clone(), message);
            }
        }

        if !errors.is_empty() {
            tracing::debug!("Submission rejected with {} field error(s)", errors.len());
        }
        Ok(errors)
    }

    /// First failing rule for one field, if any
    pub fn validate_field(&self, field: &FieldDefinition, value: Option<&FormValue>) -> Option<String> {
        if self.strict_type_checks && field.is_missing_options() {
            return Some(format!("{} has no options configured", field.label));
        }

        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ if field.is_effectively_required() => return Some(format!("{} is required", field.label)),
            _ => return None,
        };

        if field.field_type == FieldType::Email {
            let valid = value.as_text().map(|s| Email::parse(s).is_ok()).unwrap_or(false);
            if !valid {
                return Some("Please enter a valid email address".to_string());
            }
        }

        if self.strict_type_checks {
            return self.check_type(field, value);
        }
        None
    }

    fn check_type(&self, field: &FieldDefinition, value: &FormValue) -> Option<String> {
        let label = &field.label;
        let text = value.as_text();

        match field.field_type {
            FieldType::Text | FieldType::Textarea | FieldType::Phone | FieldType::File => {
                text.is_none().then(|| format!("{} must be a single value", label))
            }
            FieldType::Email => None,
            FieldType::Number => match text {
                Some(s) if s.trim().parse::<f64>().is_ok() => None,
                _ => Some(format!("{} must be a number", label)),
            },
            FieldType::Date => match text {
                Some(s) if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() => None,
                _ => Some(format!("{} must be a valid date", label)),
            },
            FieldType::Url => match text {
                Some(s) if is_http_url(s) => None,
                _ => Some("Please enter a valid URL".to_string()),
            },
            FieldType::Password => match text {
                Some(s) if s.chars().count() >= self.password_min_length => None,
                _ => Some(format!(
                    "{} must be at least {} characters",
                    label, self.password_min_length
                )),
            },
            FieldType::Select | FieldType::Radio => match text {
                Some(s) if field.options.iter().any(|o| o == s) => None,
                _ => Some(format!("Please select a valid option for {}", label)),
            },
            FieldType::Checkbox => {
                let all_known = match value {
                    FormValue::Multi(items) => items.iter().all(|i| field.options.contains(i)),
                    FormValue::Text(s) => field.options.contains(s),
                };
                (!all_known).then(|| format!("Please select a valid option for {}", label))
            }
        }
    }
}

fn is_http_url(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .strip_prefix(scheme)
            .map(|rest| !rest.is_empty() && !rest.chars().any(char::is_whitespace))
            .unwrap_or(false)
    })
}
