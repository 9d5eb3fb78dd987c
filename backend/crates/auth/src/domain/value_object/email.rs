//! Email Value Object
//!
//! Where reset links are sent. Stored trimmed and lowercased so that the
//! uniqueness check and the forgot-password lookup agree on one spelling.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// RFC 5321 path limit
pub const EMAIL_MAX_LENGTH: usize = 254;
const LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(input: impl AsRef<str>) -> AuthResult<Self> {
        let email = input.as_ref().trim().to_lowercase();
        if email.is_empty() {
            return Err(AuthError::Validation("Email is required".into()));
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Email must be at most {EMAIL_MAX_LENGTH} characters"
            )));
        }
        match email.split_once('@') {
            Some((local, domain)) if valid_local(local) && valid_domain(domain) => Ok(Self(email)),
            _ => Err(AuthError::Validation("Invalid email format".into())),
        }
    }

    /// Rows were validated on the way in
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn valid_local(local: &str) -> bool {
    !local.is_empty()
        && local.len() <= LOCAL_PART_MAX_LENGTH
        && !local.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// At least two dot-separated labels of `[a-z0-9-]`, none hyphen-edged
fn valid_domain(domain: &str) -> bool {
    let mut labels = 0;
    for label in domain.split('.') {
        let ok = !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !ok {
            return false;
        }
        labels += 1;
    }
    labels >= 2
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        for ok in ["alice@x.com", "user.name@example.co.jp", "user+tag@example.com"] {
            assert!(Email::new(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for bad in [
            "",
            "   ",
            "userexample.com",
            "user@",
            "@example.com",
            "user@@example.com",
            "user@example",
            "user@example..com",
            "user@-example.com",
            "us er@example.com",
        ] {
            assert!(
                matches!(Email::new(bad), Err(AuthError::Validation(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let email = Email::new("  Alice@X.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@x.com");
    }
}
