//! Domain events raised by the field registry

use crate::domain::services::Direction;
use crate::domain::value_objects::{Category, FieldId, FieldType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainEvent {
    Registry(RegistryEvent),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    FieldAdded { field_id: FieldId, field_type: FieldType, category: Category, order: u32 },
    FieldUpdated { field_id: FieldId },
    FieldDeleted { field_id: FieldId },
    FieldMoved { field_id: FieldId, swapped_with: FieldId, direction: Direction },
    OptionsChanged { field_id: FieldId, option_count: usize },
}
