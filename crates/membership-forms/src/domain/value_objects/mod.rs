//! Value Objects module
//!
//! Immutable domain primitives shared by the registry, renderer and validator.

pub mod category;
pub mod email;
pub mod field_type;
pub mod form_value;
pub mod visibility;

pub use category::Category;
pub use email::{Email, EmailError};
pub use field_type::FieldType;
pub use form_value::{ErrorMap, FormValue, FormValueMap};
pub use visibility::{Condition, ShowWhen};

use std::borrow::Borrow;

/// Stable field identifier
///
/// Join key between registry entries, form values and error maps.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Generate a fresh, session-unique id such as `custom_3f2a...`
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}_{}", prefix, uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = FieldId::generate("custom");
        let b = FieldId::generate("custom");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("custom_"));
    }

    #[test]
    fn test_borrow_as_str_key() {
        let mut map = std::collections::HashMap::new();
        map.insert(FieldId::from("email"), 1);
        assert_eq!(map.get("email"), Some(&1));
    }
}
