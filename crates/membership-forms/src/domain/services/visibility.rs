//! Conditional visibility evaluation

use crate::domain::aggregates::FieldDefinition;
use crate::domain::value_objects::FormValueMap;
use crate::error::SchemaError;

/// Whether field `id` is shown given the current values.
///
/// A field without a rule is always visible. A referenced field that is
/// disabled or itself hidden counts as having no value. Chain depth is
/// bounded by the registry size, so rule cycles terminate.
pub fn is_visible(
    fields: &[FieldDefinition],
    values: &FormValueMap,
    id: &str,
) -> Result<bool, SchemaError> {
    let index = fields
        .iter()
        .position(|f| f.id.as_str() == id)
        .ok_or_else(|| SchemaError::FieldNotFound { id: id.into() })?;
    visible_at(fields, values, index, fields.len())
}

fn visible_at(
    fields: &[FieldDefinition],
    values: &FormValueMap,
    index: usize,
    depth: usize,
) -> Result<bool, SchemaError> {
    let field = &fields[index];
    let Some(rule) = &field.show_when else {
        return Ok(true);
    };
    if depth == 0 {
        return Ok(false);
    }

    let parent = fields
        .iter()
        .position(|f| f.id == rule.field_id)
        .ok_or_else(|| SchemaError::UnknownConditionalReference {
            field: field.id.clone(),
            reference: rule.field_id.clone(),
        })?;

    let parent_field = &fields[parent];
    let parent_value = if parent_field.enabled && visible_at(fields, values, parent, depth - 1)? {
        values.get(&parent_field.id)
    } else {
        None
    };

    Ok(rule.is_satisfied_by(parent_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Category, FieldType, FormValue, ShowWhen};

    fn fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("hasVolunteered", "Volunteered before", FieldType::Checkbox, Category::Organization, 1)
                .with_options(["Yes"]),
            FieldDefinition::new("details", "Details", FieldType::Textarea, Category::Organization, 2)
                .with_show_when(ShowWhen::checked("hasVolunteered")),
            FieldDefinition::new("hours", "Hours", FieldType::Number, Category::Organization, 3)
                .with_show_when(ShowWhen::checked("details")),
        ]
    }

    #[test]
    fn test_unconditional_field_visible() {
        let values = FormValueMap::new();
        assert!(is_visible(&fields(), &values, "hasVolunteered").unwrap());
    }

    #[test]
    fn test_condition_follows_values() {
        let fields = fields();
        let mut values = FormValueMap::new();
        assert!(!is_visible(&fields, &values, "details").unwrap());
        values.insert("hasVolunteered".into(), FormValue::multi(["Yes"]));
        assert!(is_visible(&fields, &values, "details").unwrap());
    }

    #[test]
    fn test_hidden_parent_hides_chain() {
        let fields = fields();
        let mut values = FormValueMap::new();
        values.insert("details".into(), FormValue::text("Food bank"));
        assert!(!is_visible(&fields, &values, "hours").unwrap());
        values.insert("hasVolunteered".into(), FormValue::multi(["Yes"]));
        assert!(is_visible(&fields, &values, "hours").unwrap());
    }

    #[test]
    fn test_disabled_parent_counts_as_empty() {
        let mut fields = fields();
        fields[0].enabled = false;
        let mut values = FormValueMap::new();
        values.insert("hasVolunteered".into(), FormValue::multi(["Yes"]));
        assert!(!is_visible(&fields, &values, "details").unwrap());
    }

    #[test]
    fn test_unknown_reference_is_an_error() {
        let fields = vec![FieldDefinition::new("a", "A", FieldType::Text, Category::Personal, 1)
            .with_show_when(ShowWhen::checked("ghost"))];
        let err = is_visible(&fields, &FormValueMap::new(), "a").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownConditionalReference { .. }));
    }

    #[test]
    fn test_cycle_terminates() {
        let fields = vec![
            FieldDefinition::new("a", "A", FieldType::Text, Category::Personal, 1)
                .with_show_when(ShowWhen::unchecked("b")),
            FieldDefinition::new("b", "B", FieldType::Text, Category::Personal, 2)
                .with_show_when(ShowWhen::unchecked("a")),
        ];
        assert!(is_visible(&fields, &FormValueMap::new(), "a").unwrap());
    }
}
