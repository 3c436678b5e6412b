//! Email Value Object
//!
//! Structural `local@domain.tld` check used by the submission validator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Email address that passed the structural shape check
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Parse a submitted value as-is; surrounding whitespace is rejected
    pub fn parse(value: &str) -> Result<Self, EmailError> {
        if value.is_empty() {
            return Err(EmailError::Empty);
        }

        if !Self::is_valid_format(value) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> Option<&str> {
        self.0.split('@').nth(1)
    }

    fn is_valid_format(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let mut parts = email.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };

        // Needs a dot with content on both sides somewhere in the domain
        let last = domain.len().saturating_sub(1);
        !local.is_empty()
            && domain
                .char_indices()
                .any(|(i, c)| c == '.' && i > 0 && i < last)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    Empty,
    InvalidFormat,
}

impl std::error::Error for EmailError {}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Email cannot be empty"),
            Self::InvalidFormat => write!(f, "Please enter a valid email address"),
        }
    }
}
