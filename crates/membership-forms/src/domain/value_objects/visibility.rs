//! Conditional visibility rule

use serde::{Deserialize, Serialize};

use super::{FieldId, FormValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Checked,
    Unchecked,
    Equals,
}

/// Show the owning field only while `field_id`'s value satisfies `condition`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowWhen {
    pub field_id: FieldId,
    pub condition: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ShowWhen {
    pub fn checked(field_id: impl Into<FieldId>) -> Self {
        Self { field_id: field_id.into(), condition: Condition::Checked, value: None }
    }

    pub fn unchecked(field_id: impl Into<FieldId>) -> Self {
        Self { field_id: field_id.into(), condition: Condition::Unchecked, value: None }
    }

    pub fn equals(field_id: impl Into<FieldId>, value: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            condition: Condition::Equals,
            value: Some(value.into()),
        }
    }

    /// Evaluate against the referenced field's current value.
    ///
    /// A value is "checked" when present, non-empty and not the literal
    /// `"false"`. `equals` with no comparison value matches an absent/empty value.
    pub fn is_satisfied_by(&self, value: Option<&FormValue>) -> bool {
        let checked = value
            .map(|v| !v.is_empty() && v.as_text() != Some("false"))
            .unwrap_or(false);

        match self.condition {
            Condition::Checked => checked,
            Condition::Unchecked => !checked,
            Condition::Equals => match (&self.value, value) {
                (Some(expected), Some(actual)) => actual.contains(expected),
                (Some(_), None) => false,
                (None, actual) => actual.map(FormValue::is_empty).unwrap_or(true),
            },
        }
    }
}
