//! Stock membership application form
//!
//! The schema a fresh deployment starts from. System fields are the ones the
//! rest of the platform looks up by id.

use crate::domain::aggregates::FieldDefinition;
use crate::domain::value_objects::{Category, FieldType, ShowWhen};

/// Default membership form: 38 fields, order keys 1..=38
pub fn default_membership_form() -> Vec<FieldDefinition> {
    use Category::*;
    use FieldType as T;

    vec![
        // Personal
        FieldDefinition::new("firstName", "First Name", T::Text, Personal, 1)
            .required()
            .system()
            .with_placeholder("Enter your first name"),
        FieldDefinition::new("lastName", "Last Name", T::Text, Personal, 2)
            .required()
            .system()
            .with_placeholder("Enter your last name"),
        FieldDefinition::new("preferredName", "Preferred Name", T::Text, Personal, 3)
            .with_placeholder("What should we call you?"),
        FieldDefinition::new("dateOfBirth", "Date of Birth", T::Date, Personal, 4).required(),
        // Demographics
        FieldDefinition::new("gender", "Gender", T::Select, Demographics, 5)
            .with_options(["Female", "Male", "Non-binary", "Prefer not to say"]),
        FieldDefinition::new("pronouns", "Pronouns", T::Select, Demographics, 6)
            .with_options(["She/her", "He/him", "They/them", "Other"]),
        FieldDefinition::new("ethnicity", "Ethnicity", T::Select, Demographics, 7)
            .with_options([
                "American Indian or Alaska Native",
                "Asian",
                "Black or African American",
                "Hispanic or Latino",
                "Native Hawaiian or Pacific Islander",
                "White",
                "Two or more",
                "Prefer not to say",
            ])
            .disabled(),
        FieldDefinition::new("school", "School", T::Text, Demographics, 8)
            .with_placeholder("Current school"),
        FieldDefinition::new("gradeLevel", "Grade Level", T::Select, Demographics, 9)
            .with_options(["9", "10", "11", "12", "College"]),
        // Contact
        FieldDefinition::new("email", "Email Address", T::Email, Contact, 10)
            .required()
            .system()
            .with_placeholder("you@example.com"),
        FieldDefinition::new("phone", "Phone Number", T::Phone, Contact, 11)
            .with_placeholder("(555) 555-5555"),
        FieldDefinition::new("alternatePhone", "Alternate Phone", T::Phone, Contact, 12).disabled(),
        FieldDefinition::new("preferredContact", "Preferred Contact Method", T::Radio, Contact, 13)
            .with_options(["Email", "Phone", "Text message"]),
        // Address
        FieldDefinition::new("streetAddress", "Street Address", T::Text, Address, 14),
        FieldDefinition::new("city", "City", T::Text, Address, 15),
        FieldDefinition::new("state", "State", T::Text, Address, 16),
        FieldDefinition::new("zipCode", "ZIP Code", T::Text, Address, 17),
        FieldDefinition::new("country", "Country", T::Select, Address, 18)
            .with_options(["United States", "Canada", "Other"])
            .disabled(),
        // Social
        FieldDefinition::new("instagram", "Instagram Handle", T::Text, Social, 19)
            .with_placeholder("@username"),
        FieldDefinition::new("linkedin", "LinkedIn Profile", T::Url, Social, 20).disabled(),
        FieldDefinition::new("website", "Personal Website", T::Url, Social, 21).disabled(),
        // Emergency
        FieldDefinition::new("emergencyContactName", "Emergency Contact Name", T::Text, Emergency, 22)
            .required(),
        FieldDefinition::new("emergencyContactPhone", "Emergency Contact Phone", T::Phone, Emergency, 23)
            .required(),
        FieldDefinition::new("emergencyContactRelationship", "Relationship", T::Select, Emergency, 24)
            .with_options(["Parent", "Guardian", "Sibling", "Other"]),
        // Organization
        FieldDefinition::new("committee", "Committee Interest", T::Select, Organization, 25)
            .with_options(["Events", "Outreach", "Fundraising", "Communications"]),
        FieldDefinition::new("membershipType", "Membership Type", T::Radio, Organization, 26)
            .with_options(["General", "Executive", "Alumni"]),
        FieldDefinition::new("interests", "Areas of Interest", T::Checkbox, Organization, 27)
            .with_options(["Leadership", "Community Service", "Professional Development", "Social Events"]),
        FieldDefinition::new("referralSource", "How did you hear about us?", T::Select, Organization, 28)
            .with_options(["Friend", "School", "Social media", "Event", "Other"]),
        FieldDefinition::new("hasVolunteered", "Previous Volunteering", T::Checkbox, Organization, 29)
            .with_options(["I have volunteered with the organization before"]),
        FieldDefinition::new("volunteerDetails", "Volunteer Experience", T::Textarea, Organization, 30)
            .with_placeholder("Tell us where and when")
            .with_show_when(ShowWhen::checked("hasVolunteered")),
        FieldDefinition::new("whyJoin", "Why do you want to join?", T::Textarea, Organization, 31)
            .required(),
        // Privacy
        FieldDefinition::new("photoRelease", "Photo Release", T::Checkbox, Privacy, 32)
            .with_options(["I consent to photos being used in publications"]),
        FieldDefinition::new("directoryListing", "Member Directory", T::Radio, Privacy, 33)
            .with_options(["Show my profile in the member directory", "Hide my profile"]),
        FieldDefinition::new("termsAccepted", "Terms and Conditions", T::Checkbox, Privacy, 34)
            .required()
            .with_options(["I agree to the terms and conditions"]),
        // Account
        FieldDefinition::new("username", "Username", T::Text, Account, 35)
            .required()
            .system(),
        FieldDefinition::new("password", "Password", T::Password, Account, 36)
            .required()
            .system(),
        FieldDefinition::new("profilePhoto", "Profile Photo", T::File, Account, 37).disabled(),
        // System
        FieldDefinition::new("memberId", "Member ID", T::Text, System, 38)
            .system()
            .disabled(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormsConfig;
    use crate::domain::aggregates::FieldRegistry;
    use crate::domain::services::{is_visible, PreviewRenderer, RenderMode, SubmissionValidator};
    use crate::domain::value_objects::{ErrorMap, FormValueMap};
    use crate::error::SchemaError;

    #[test]
    fn test_seed_loads_into_registry() {
        let registry = FieldRegistry::from_fields(default_membership_form(), FormsConfig::default()).unwrap();
        assert_eq!(registry.len(), 38);
        assert_eq!(registry.max_order(), 38);
        for category in Category::ALL {
            assert!(!registry.list_by_category(category).is_empty(), "{} is empty", category);
        }
    }

    #[test]
    fn test_seed_choice_fields_have_options() {
        assert!(default_membership_form().iter().all(|f| !f.is_missing_options()));
    }

    #[test]
    fn test_seed_visibility_rules_resolve() {
        let fields = default_membership_form();
        let values = FormValueMap::new();
        for field in &fields {
            assert!(is_visible(&fields, &values, field.id.as_str()).is_ok());
        }
    }

    #[test]
    fn test_add_after_seed_takes_next_order() {
        let mut registry = FieldRegistry::from_fields(default_membership_form(), FormsConfig::default()).unwrap();
        let field = registry.add(Category::Personal, FieldType::Select).unwrap();
        assert_eq!(field.order, 39);
        assert!(field.enabled);
        assert!(!field.required);
        assert_eq!(field.options, vec!["Option 1", "Option 2", "Option 3"]);
    }

    #[test]
    fn test_volunteer_toggle_outlives_delete_attempt() {
        let mut registry = FieldRegistry::from_fields(default_membership_form(), FormsConfig::default()).unwrap();
        let err = registry.delete("hasVolunteered").unwrap_err();
        assert_eq!(
            err,
            SchemaError::FieldReferenced { id: "hasVolunteered".into(), by: "volunteerDetails".into() }
        );
        assert_eq!(registry.len(), 38);

        let values = FormValueMap::new();
        assert!(SubmissionValidator::default().validate(registry.fields(), &values).is_ok());
        assert!(PreviewRenderer::default()
            .render_form(registry.fields(), &values, &ErrorMap::new(), RenderMode::LiveSubmission)
            .is_ok());
    }

    #[test]
    fn test_system_fields() {
        let ids: Vec<_> = default_membership_form()
            .into_iter()
            .filter(|f| f.system_field)
            .map(|f| f.id.to_string())
            .collect();
        assert_eq!(ids, vec!["firstName", "lastName", "email", "username", "password", "memberId"]);
    }
}
