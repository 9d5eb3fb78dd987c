//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. Strength policy violations
//! surface as [`AuthError::WeakPassword`].

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Password that is about to be stored: strength policy enforced
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new_strong(raw)
            .map(Self)
            .map_err(|e| AuthError::WeakPassword(e.to_string()))
    }

    /// Password presented at sign-in: only needs to be non-empty
    pub fn for_sign_in(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|_| AuthError::Validation("Password is required".to_string()))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id hash of a user's password
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Restore from the PHC string kept in the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e: PasswordHashError| {
                AuthError::Internal(format!("Invalid password hash in database: {e}"))
            })
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_violation_is_weak_password() {
        assert!(RawPassword::new("Str0ng!Pass".to_string()).is_ok());
        assert!(matches!(
            RawPassword::new("weakpass".to_string()),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            RawPassword::new("NoDigits!!".to_string()),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_sign_in_password_only_requires_content() {
        assert!(RawPassword::for_sign_in("weak".to_string()).is_ok());
        assert!(matches!(
            RawPassword::for_sign_in(String::new()),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Str0ng!Pass".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        assert!(hashed.verify(&raw, Some(b"pepper")));
        assert!(!hashed.verify(&raw, None));

        let wrong = RawPassword::for_sign_in("Str0ng!Pas".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, Some(b"pepper")));
    }

    #[test]
    fn test_restore_from_phc_string() {
        let raw = RawPassword::new("Str0ng!Pass".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));

        assert!(matches!(
            UserPassword::from_phc_string("plaintext"),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("Str0ng!Pass".to_string()).unwrap();
        assert!(format!("{:?}", raw).contains("REDACTED"));
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
