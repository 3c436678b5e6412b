//! Preview Renderer
//!
//! Pure mapping from a field definition and its current value to a control
//! description. The same output drives the administrator preview and the
//! applicant form; the UI layer only paints what it is given.

use serde::Serialize;

use crate::config::FormsConfig;
use crate::domain::aggregates::FieldDefinition;
use crate::domain::value_objects::{Category, ErrorMap, FieldId, FieldType, FormValue, FormValueMap};
use crate::error::SchemaError;

use super::grouping::in_display_order;
use super::visibility::is_visible;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Administrator preview that can be clicked through
    EditablePreview,
    /// "How applicants will see this": structure only, no state
    DisabledPreview,
    /// Applicant form bound to a live value map
    LiveSubmission,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Url,
    Password,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceItem {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Widget {
    Input { input_type: InputType, placeholder: Option<String>, value: String },
    TextArea { placeholder: Option<String>, value: String },
    Select { placeholder: String, options: Vec<ChoiceItem> },
    RadioGroup { options: Vec<ChoiceItem> },
    CheckboxGroup { options: Vec<ChoiceItem> },
    FileInput { file_name: Option<String> },
}

/// Description of one rendered form control
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedControl {
    pub field_id: FieldId,
    pub label: String,
    pub category: Category,
    pub required: bool,
    pub interactive: bool,
    pub widget: Widget,
    pub error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct PreviewRenderer {
    select_placeholder: String,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::from_config(&FormsConfig::default())
    }
}

impl PreviewRenderer {
    pub fn from_config(config: &FormsConfig) -> Self {
        Self { select_placeholder: config.select_placeholder.clone() }
    }

    /// Render a single field.
    ///
    /// `DisabledPreview` ignores `value` and `error`; `EditablePreview` echoes
    /// the value but never shows errors. Missing options render as an empty
    /// list.
    pub fn render(
        &self,
        field: &FieldDefinition,
        value: Option<&FormValue>,
        error: Option<&str>,
        mode: RenderMode,
    ) -> RenderedControl {
        let (value, error) = match mode {
            RenderMode::DisabledPreview => (None, None),
            RenderMode::EditablePreview => (value, None),
            RenderMode::LiveSubmission => (value, error),
        };

        RenderedControl {
            field_id: field.id.clone(),
            label: field.label.clone(),
            category: field.category,
            required: field.required,
            interactive: mode != RenderMode::DisabledPreview,
            widget: self.widget(field, value),
            error: error.map(str::to_string),
        }
    }

    /// Render every enabled, visible field in display order.
    ///
    /// Hidden fields are omitted, not disabled. In `DisabledPreview` mode
    /// visibility is evaluated against an empty value map.
    pub fn render_form(
        &self,
        fields: &[FieldDefinition],
        values: &FormValueMap,
        errors: &ErrorMap,
        mode: RenderMode,
    ) -> Result<Vec<RenderedControl>, SchemaError> {
        let no_values = FormValueMap::new();
        let values = if mode == RenderMode::DisabledPreview { &no_values } else { values };

        let mut controls = Vec::new();
        for field in in_display_order(fields) {
            if !field.enabled || !is_visible(fields, values, field.id.as_str())? {
                continue;
            }
            let error = errors.get(&field.id).map(String::as_str);
            controls.push(self.render(field, values.get(&field.id), error, mode));
        }
        Ok(controls)
    }

    fn widget(&self, field: &FieldDefinition, value: Option<&FormValue>) -> Widget {
        let text = value.and_then(FormValue::as_text).unwrap_or_default().to_string();
        let placeholder = if field.field_type.accepts_placeholder() {
            field.placeholder.clone()
        } else {
            None
        };
        let input = |input_type| Widget::Input {
            input_type,
            placeholder: placeholder.clone(),
            value: text.clone(),
        };

        match field.field_type {
            FieldType::Text => input(InputType::Text),
            FieldType::Email => input(InputType::Email),
            FieldType::Phone => input(InputType::Tel),
            FieldType::Number => input(InputType::Number),
            FieldType::Url => input(InputType::Url),
            FieldType::Password => input(InputType::Password),
            FieldType::Date => Widget::Input { input_type: InputType::Date, placeholder: None, value: text.clone() },
            FieldType::Textarea => Widget::TextArea { placeholder: placeholder.clone(), value: text.clone() },
            FieldType::Select => Widget::Select {
                placeholder: self.select_placeholder.clone(),
                options: choices(&field.options, value),
            },
            FieldType::Radio => Widget::RadioGroup { options: choices(&field.options, value) },
            FieldType::Checkbox => Widget::CheckboxGroup { options: choices(&field.options, value) },
            FieldType::File => Widget::FileInput {
                file_name: value
                    .and_then(FormValue::as_text)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            },
        }
    }
}

/// Options exactly as stored: same order, duplicates kept
fn choices(options: &[String], value: Option<&FormValue>) -> Vec<ChoiceItem> {
    options
        .iter()
        .map(|option| ChoiceItem {
            value: option.clone(),
            label: option.clone(),
            selected: value.map(|v| v.contains(option)).unwrap_or(false),
        })
        .collect()
}
