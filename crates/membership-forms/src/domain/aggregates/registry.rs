//! Field Registry Aggregate
//!
//! Authoritative set of field definitions owned by one editor session. All
//! mutations are synchronous and in-memory; a rejected mutation leaves the
//! registry exactly as it was.

use std::collections::HashSet;

use crate::config::FormsConfig;
use crate::domain::aggregates::{FieldChanges, FieldDefinition};
use crate::domain::events::{DomainEvent, RegistryEvent};
use crate::domain::services::grouping::in_display_order;
use crate::domain::services::ordering::{self, Direction};
use crate::domain::value_objects::{Category, FieldId, FieldType};
use crate::error::SchemaError;

/// Field registry aggregate root
#[derive(Clone, Debug, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDefinition>,
    config: FormsConfig,
    // Domain events accumulated during operations
    events: Vec<DomainEvent>,
}

impl FieldRegistry {
    pub fn new(config: FormsConfig) -> Self {
        Self { fields: Vec::new(), config, events: Vec::new() }
    }

    /// Build from a loaded schema. Field ids must be unique and every
    /// visibility rule must point at another field of the schema.
    pub fn from_fields(fields: Vec<FieldDefinition>, config: FormsConfig) -> Result<Self, SchemaError> {
        if let Some(duplicate) = Self::first_duplicate(&fields) {
            return Err(SchemaError::DuplicateFieldId { id: duplicate });
        }
        if let Some((field, reference)) = Self::first_dangling_rule(&fields) {
            return Err(SchemaError::UnknownConditionalReference { field, reference });
        }
        Ok(Self { fields, config, events: Vec::new() })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Fields in insertion order
    pub fn fields(&self) -> &[FieldDefinition] { &self.fields }
    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
    pub fn config(&self) -> &FormsConfig { &self.config }

    pub fn get(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Fields of `category`, ascending by order; ties keep insertion order
    pub fn list_by_category(&self, category: Category) -> Vec<&FieldDefinition> {
        ordering::positions_in_category(&self.fields, category)
            .into_iter()
            .map(|i| &self.fields[i])
            .collect()
    }

    /// Enabled fields in display order
    pub fn enabled_fields(&self) -> Vec<&FieldDefinition> {
        in_display_order(&self.fields).into_iter().filter(|f| f.enabled).collect()
    }

    /// Highest order key across the whole registry (0 when empty)
    pub fn max_order(&self) -> u32 {
        self.fields.iter().map(|f| f.order).max().unwrap_or(0)
    }

    /// Whether a move would do anything; the UI disables the control otherwise
    pub fn can_move(&self, id: &str, direction: Direction) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let sorted = ordering::positions_in_category(&self.fields, self.fields[index].category);
        ordering::neighbor(&sorted, index, direction).is_some()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a new field of `field_type` to `category`.
    ///
    /// Its order is one past the global maximum. Choice types get
    /// "Option 1".."Option N" placeholders.
    pub fn add(&mut self, category: Category, field_type: FieldType) -> Result<&FieldDefinition, SchemaError> {
        let order = self.next_order()?;
        let mut field = FieldDefinition::new(
            FieldId::generate(&self.config.custom_id_prefix),
            field_type.default_label(),
            field_type,
            category,
            order,
        );
        if field_type.requires_options() {
            field.options = (1..=self.config.placeholder_option_count)
                .map(|i| format!("Option {}", i))
                .collect();
        }

        tracing::debug!("Adding {} field {} to {}", field_type, field.id, category);
        self.raise_event(DomainEvent::Registry(RegistryEvent::FieldAdded {
            field_id: field.id.clone(),
            field_type,
            category,
            order: field.order,
        }));

        self.fields.push(field);
        let last = self.fields.len() - 1;
        Ok(&self.fields[last])
    }

    /// Merge `changes` into field `id`.
    ///
    /// Moving a field to another category appends it there (order becomes
    /// one past the global maximum). Switching to a non-choice type drops its
    /// options.
    pub fn update(&mut self, id: &str, changes: FieldChanges) -> Result<(), SchemaError> {
        let index = self.require(id)?;

        if let Some(new_id) = &changes.id {
            if new_id.as_str() != id {
                tracing::warn!("Rejected id change on field {}", id);
                return Err(SchemaError::IdImmutable { id: id.into() });
            }
        }
        if let Some(Some(rule)) = &changes.show_when {
            if rule.field_id.as_str() == id || !self.contains(rule.field_id.as_str()) {
                tracing::warn!("Rejected visibility rule on {} -> {}", id, rule.field_id);
                return Err(SchemaError::UnknownConditionalReference {
                    field: id.into(),
                    reference: rule.field_id.clone(),
                });
            }
        }

        let moves_category = changes.category.is_some_and(|c| c != self.fields[index].category);
        let next_order = if moves_category { self.next_order()? } else { self.fields[index].order };
        let field = &mut self.fields[index];

        if let Some(label) = changes.label {
            field.label = label;
        }
        if let Some(field_type) = changes.field_type {
            field.field_type = field_type;
            if !field_type.requires_options() {
                field.options.clear();
            }
        }
        if let Some(required) = changes.required {
            field.required = required;
        }
        if let Some(enabled) = changes.enabled {
            field.enabled = enabled;
        }
        if let Some(category) = changes.category {
            if category != field.category {
                field.category = category;
                field.order = next_order;
            }
        }
        if let Some(placeholder) = changes.placeholder {
            field.placeholder = placeholder;
        }
        if let Some(options) = changes.options {
            if field.field_type.requires_options() {
                field.options = options;
            }
        }
        if let Some(rule) = changes.show_when {
            field.show_when = rule;
        }

        tracing::debug!("Updated field {}", id);
        self.raise_event(DomainEvent::Registry(RegistryEvent::FieldUpdated { field_id: id.into() }));
        Ok(())
    }

    /// Remove a non-system field outright; siblings keep their order keys.
    ///
    /// A field that another field's visibility rule points at stays until
    /// that rule is removed.
    pub fn delete(&mut self, id: &str) -> Result<FieldDefinition, SchemaError> {
        let index = self.require(id)?;
        if self.fields[index].system_field {
            tracing::warn!("Rejected delete of system field {}", id);
            return Err(SchemaError::SystemFieldProtected { id: id.into() });
        }
        if let Some(dependent) = self
            .fields
            .iter()
            .find(|f| f.show_when.as_ref().is_some_and(|rule| rule.field_id.as_str() == id))
        {
            tracing::warn!("Rejected delete of {}: referenced by {}", id, dependent.id);
            return Err(SchemaError::FieldReferenced { id: id.into(), by: dependent.id.clone() });
        }

        let removed = self.fields.remove(index);
        tracing::debug!("Deleted field {}", id);
        self.raise_event(DomainEvent::Registry(RegistryEvent::FieldDeleted { field_id: removed.id.clone() }));
        Ok(removed)
    }

    /// Flip `enabled`; returns the new value
    pub fn toggle_enabled(&mut self, id: &str) -> Result<bool, SchemaError> {
        let index = self.require(id)?;
        let enabled = !self.fields[index].enabled;
        self.fields[index].enabled = enabled;
        self.raise_event(DomainEvent::Registry(RegistryEvent::FieldUpdated { field_id: id.into() }));
        Ok(enabled)
    }

    /// Flip `required`; ignored while the field is disabled. Returns the
    /// resulting value.
    pub fn toggle_required(&mut self, id: &str) -> Result<bool, SchemaError> {
        let index = self.require(id)?;
        let field = &mut self.fields[index];
        if !field.enabled {
            return Ok(field.required);
        }
        field.required = !field.required;
        let required = field.required;
        self.raise_event(DomainEvent::Registry(RegistryEvent::FieldUpdated { field_id: id.into() }));
        Ok(required)
    }

    /// Append the configured default option; returns its index
    pub fn add_option(&mut self, id: &str) -> Result<usize, SchemaError> {
        let label = self.config.default_option_label.clone();
        self.add_option_with(id, label)
    }

    pub fn add_option_with(&mut self, id: &str, value: impl Into<String>) -> Result<usize, SchemaError> {
        let index = self.require(id)?;
        let options = &mut self.fields[index].options;
        options.push(value.into());
        let position = options.len() - 1;
        self.options_changed(index);
        Ok(position)
    }

    pub fn update_option(&mut self, id: &str, option: usize, value: impl Into<String>) -> Result<(), SchemaError> {
        let index = self.require(id)?;
        let len = self.fields[index].options.len();
        let slot = self.fields[index]
            .options
            .get_mut(option)
            .ok_or_else(|| SchemaError::OptionIndexOutOfRange { id: id.into(), index: option, len })?;
        *slot = value.into();
        self.options_changed(index);
        Ok(())
    }

    pub fn delete_option(&mut self, id: &str, option: usize) -> Result<String, SchemaError> {
        let index = self.require(id)?;
        let len = self.fields[index].options.len();
        if option >= len {
            return Err(SchemaError::OptionIndexOutOfRange { id: id.into(), index: option, len });
        }
        let removed = self.fields[index].options.remove(option);
        self.options_changed(index);
        Ok(removed)
    }

    /// Move one step earlier within the category; `Ok(false)` when already first
    pub fn move_up(&mut self, id: &str) -> Result<bool, SchemaError> {
        self.move_field(id, Direction::Up)
    }

    /// Move one step later within the category; `Ok(false)` when already last
    pub fn move_down(&mut self, id: &str) -> Result<bool, SchemaError> {
        self.move_field(id, Direction::Down)
    }

    pub fn move_field(&mut self, id: &str, direction: Direction) -> Result<bool, SchemaError> {
        let index = self.require(id)?;
        let Some(swapped_with) = ordering::swap_with_neighbor(&mut self.fields, index, direction) else {
            return Ok(false);
        };

        tracing::debug!("Moved field {} {:?} past {}", id, direction, swapped_with);
        self.raise_event(DomainEvent::Registry(RegistryEvent::FieldMoved {
            field_id: id.into(),
            swapped_with,
            direction,
        }));
        Ok(true)
    }

    // =========================================================================
    // Domain Events
    // =========================================================================

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn options_changed(&mut self, index: usize) {
        let field = &self.fields[index];
        let event = RegistryEvent::OptionsChanged {
            field_id: field.id.clone(),
            option_count: field.options.len(),
        };
        self.raise_event(DomainEvent::Registry(event));
    }

    fn first_duplicate(fields: &[FieldDefinition]) -> Option<FieldId> {
        let mut seen = HashSet::new();
        fields
            .iter()
            .find(|f| !seen.insert(f.id.as_str()))
            .map(|f| f.id.clone())
    }

    fn first_dangling_rule(fields: &[FieldDefinition]) -> Option<(FieldId, FieldId)> {
        fields.iter().find_map(|f| {
            let rule = f.show_when.as_ref()?;
            let known = rule.field_id != f.id && fields.iter().any(|other| other.id == rule.field_id);
            (!known).then(|| (f.id.clone(), rule.field_id.clone()))
        })
    }

    fn next_order(&self) -> Result<u32, SchemaError> {
        let max = self.max_order();
        max.checked_add(1).ok_or(SchemaError::OrderExhausted { max })
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id.as_str() == id)
    }

    fn require(&self, id: &str) -> Result<usize, SchemaError> {
        self.index_of(id).ok_or_else(|| SchemaError::FieldNotFound { id: id.into() })
    }
}
