//! Field definition entity and its partial-update patch

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Category, FieldId, FieldType, ShowWhen};

fn default_enabled() -> bool {
    true
}

/// Schema record describing one form field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: FieldId,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub category: Category,
    #[serde(default)]
    pub system_field: bool,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, alias = "conditionalField", skip_serializing_if = "Option::is_none")]
    pub show_when: Option<ShowWhen>,
}

impl FieldDefinition {
    /// Enabled, optional, non-system field
    pub fn new(
        id: impl Into<FieldId>,
        label: impl Into<String>,
        field_type: FieldType,
        category: Category,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
            required: false,
            enabled: true,
            category,
            system_field: false,
            order,
            placeholder: None,
            options: Vec::new(),
            show_when: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn system(mut self) -> Self {
        self.system_field = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_show_when(mut self, rule: ShowWhen) -> Self {
        self.show_when = Some(rule);
        self
    }

    /// Choice field without any options (valid while editing, not at submit)
    pub fn is_missing_options(&self) -> bool {
        self.field_type.requires_options() && self.options.is_empty()
    }

    /// Required only counts while the field is enabled
    pub fn is_effectively_required(&self) -> bool {
        self.enabled && self.required
    }
}

/// Partial update merged by `FieldRegistry::update`.
///
/// `order` is absent: it only changes through the ordering engine. Setting
/// `id` to anything other than the current id is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldChanges {
    pub id: Option<FieldId>,
    pub label: Option<String>,
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    pub enabled: Option<bool>,
    pub category: Option<Category>,
    pub placeholder: Option<Option<String>>,
    pub options: Option<Vec<String>>,
    pub show_when: Option<Option<ShowWhen>>,
}

impl FieldChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<FieldId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn show_when(mut self, rule: Option<ShowWhen>) -> Self {
        self.show_when = Some(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_persisted_shape() {
        let json = r#"{
            "id": "volunteerDetails",
            "label": "Volunteer Details",
            "type": "textarea",
            "required": false,
            "enabled": true,
            "category": "organization",
            "order": 30,
            "conditionalField": {"fieldId": "hasVolunteered", "condition": "checked"}
        }"#;
        let field: FieldDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, FieldType::Textarea);
        assert!(!field.system_field);
        assert_eq!(field.show_when, Some(ShowWhen::checked("hasVolunteered")));
    }

    #[test]
    fn test_enabled_defaults_to_true() {
        let json = r#"{"id":"city","label":"City","type":"text","category":"address","order":3}"#;
        let field: FieldDefinition = serde_json::from_str(json).unwrap();
        assert!(field.enabled);
        assert!(!field.required);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let field = FieldDefinition::new("email", "Email Address", FieldType::Email, Category::Contact, 1)
            .required()
            .system();
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["systemField"], true);
        assert_eq!(value["type"], "email");
        assert!(value.get("options").is_none());
    }

    #[test]
    fn test_disabled_field_is_not_effectively_required() {
        let field = FieldDefinition::new("bio", "Bio", FieldType::Textarea, Category::Personal, 1)
            .required()
            .disabled();
        assert!(field.required);
        assert!(!field.is_effectively_required());
    }
}
