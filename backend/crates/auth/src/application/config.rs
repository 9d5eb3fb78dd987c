//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use crate::error::{AuthError, AuthResult};

/// Default landing page for password reset links
pub const DEFAULT_RESET_LINK_BASE: &str = "http://localhost:5173/forgot-password";

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Token signing secret; never empty
    token_secret: Vec<u8>,
    /// Session token lifetime (1 hour)
    pub session_ttl: Duration,
    /// Password reset token lifetime (15 minutes)
    pub reset_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Page that receives `?token=<reset token>`
    pub reset_link_base: String,
}

impl AuthConfig {
    /// Build a config around a signing secret.
    ///
    /// There is no fallback secret: an empty or blank one is rejected.
    pub fn new(token_secret: impl Into<Vec<u8>>) -> AuthResult<Self> {
        let token_secret = token_secret.into();
        if token_secret.iter().all(u8::is_ascii_whitespace) {
            return Err(AuthError::Internal(
                "token signing secret must not be empty".to_string(),
            ));
        }
        Ok(Self {
            token_secret,
            session_ttl: Duration::from_secs(60 * 60),
            reset_ttl: Duration::from_secs(15 * 60),
            password_pepper: None,
            reset_link_base: DEFAULT_RESET_LINK_BASE.to_string(),
        })
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        let pepper = pepper.into();
        self.password_pepper = (!pepper.is_empty()).then_some(pepper);
        self
    }

    pub fn with_reset_link_base(mut self, base: impl Into<String>) -> Self {
        self.reset_link_base = base.into();
        self
    }

    pub fn token_secret(&self) -> &[u8] {
        &self.token_secret
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Link mailed to the user for a given reset token
    pub fn reset_link(&self, token: &str) -> String {
        format!("{}?token={}", self.reset_link_base.trim_end_matches('?'), token)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("reset_ttl", &self.reset_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("reset_link_base", &self.reset_link_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert!(AuthConfig::new("").is_err());
        assert!(AuthConfig::new("   ").is_err());
        assert!(AuthConfig::new("s3cret").is_ok());
    }

    #[test]
    fn test_default_lifetimes() {
        let config = AuthConfig::new("s3cret").unwrap();
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.reset_ttl, Duration::from_secs(900));
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_reset_link() {
        let config = AuthConfig::new("s3cret")
            .unwrap()
            .with_reset_link_base("https://homes.example/forgot-password");
        assert_eq!(
            config.reset_link("abc.def"),
            "https://homes.example/forgot-password?token=abc.def"
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig::new("s3cret").unwrap().with_pepper("pepper");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
