//! Category grouping

use crate::domain::aggregates::FieldDefinition;
use crate::domain::value_objects::Category;

use super::ordering::positions_in_category;

/// One category section of the editor or preview
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub fields: Vec<&'a FieldDefinition>,
}

impl CategoryGroup<'_> {
    pub fn title(&self) -> &'static str {
        self.category.title()
    }

    pub fn enabled_count(&self) -> usize {
        self.fields.iter().filter(|f| f.enabled).count()
    }
}

/// Partition `fields` into groups in fixed category order, each sorted by order
pub fn group_by_category(fields: &[FieldDefinition], include_empty: bool) -> Vec<CategoryGroup<'_>> {
    Category::ALL
        .iter()
        .map(|&category| CategoryGroup {
            category,
            fields: positions_in_category(fields, category)
                .into_iter()
                .map(|i| &fields[i])
                .collect(),
        })
        .filter(|group| include_empty || !group.fields.is_empty())
        .collect()
}

/// Every field in render sequence: category order, then order key, then insertion
pub fn in_display_order(fields: &[FieldDefinition]) -> Vec<&FieldDefinition> {
    group_by_category(fields, false)
        .into_iter()
        .flat_map(|group| group.fields)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;

    fn sample() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("phone", "Phone", FieldType::Phone, Category::Contact, 2),
            FieldDefinition::new("username", "Username", FieldType::Text, Category::Account, 1),
            FieldDefinition::new("email", "Email", FieldType::Email, Category::Contact, 1),
            FieldDefinition::new("firstName", "First Name", FieldType::Text, Category::Personal, 7)
                .disabled(),
        ]
    }

    #[test]
    fn test_groups_follow_category_order() {
        let fields = sample();
        let groups = group_by_category(&fields, false);
        let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec![Category::Personal, Category::Contact, Category::Account]);
        let contact: Vec<_> = groups[1].fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(contact, vec!["email", "phone"]);
        assert_eq!(groups[0].enabled_count(), 0);
    }

    #[test]
    fn test_include_empty_lists_every_category() {
        let fields = sample();
        assert_eq!(group_by_category(&fields, true).len(), Category::ALL.len());
    }

    #[test]
    fn test_display_order() {
        let fields = sample();
        let ids: Vec<_> = in_display_order(&fields).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["firstName", "email", "phone", "username"]);
    }
}
