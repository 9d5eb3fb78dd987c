//! First/last name of an account holder

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

pub const PERSON_NAME_MAX_LENGTH: usize = 50;

/// Trimmed, non-empty, free-text name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    /// `field` names the input in the error message ("First name", "Last name")
    pub fn new(input: impl AsRef<str>, field: &str) -> AuthResult<Self> {
        let name = input.as_ref().trim();
        if name.is_empty() {
            return Err(AuthError::Validation(format!("{field} is required")));
        }
        if name.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "{field} must be at most {PERSON_NAME_MAX_LENGTH} characters"
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(AuthError::Validation(format!(
                "{field} contains invalid characters"
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
