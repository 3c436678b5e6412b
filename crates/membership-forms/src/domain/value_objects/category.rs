//! Field categories
//!
//! Fixed, ordered grouping buckets. The declaration order is the display order
//! of groups in both the editor and the applicant form.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Demographics,
    Contact,
    Address,
    Social,
    Emergency,
    Organization,
    Privacy,
    Account,
    System,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Personal,
        Category::Demographics,
        Category::Contact,
        Category::Address,
        Category::Social,
        Category::Emergency,
        Category::Organization,
        Category::Privacy,
        Category::Account,
        Category::System,
    ];

    /// Position of this category in display order
    pub fn position(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Demographics => "demographics",
            Self::Contact => "contact",
            Self::Address => "address",
            Self::Social => "social",
            Self::Emergency => "emergency",
            Self::Organization => "organization",
            Self::Privacy => "privacy",
            Self::Account => "account",
            Self::System => "system",
        }
    }

    /// Section heading shown above the group
    pub fn title(&self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Demographics => "Demographics",
            Self::Contact => "Contact Information",
            Self::Address => "Address",
            Self::Social => "Social Media",
            Self::Emergency => "Emergency Contact",
            Self::Organization => "Organization",
            Self::Privacy => "Privacy & Consent",
            Self::Account => "Account",
            Self::System => "System",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
