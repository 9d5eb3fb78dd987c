//! Token Service
//!
//! Signed, time-limited bearer tokens (HS256 JWT). Session and password
//! reset tokens are signed with different keys derived from the configured
//! secret and also carry their purpose as a claim, so one can never be
//! accepted as the other.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::AuthConfig;

const SESSION_KEY_LABEL: &str = "homes/session-token/v1";
const RESET_KEY_LABEL: &str = "homes/password-reset-token/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    #[display("session")]
    Session,
    #[display("password_reset")]
    PasswordReset,
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub username: String,
    pub purpose: TokenPurpose,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
    /// Unique per token; two tokens minted in the same second still differ
    pub jti: Uuid,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed, or minted for another purpose
    #[error("invalid token")]
    Invalid,

    #[error("token expired")]
    Expired,

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// A freshly minted token and its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn derive(secret: &[u8], label: &str) -> Self {
        let key = platform::crypto::derive_key(secret, label);
        Self {
            encoding: EncodingKey::from_secret(&key),
            decoding: DecodingKey::from_secret(&key),
        }
    }
}

pub struct TokenService {
    session: Keys,
    reset: Keys,
    session_ttl: chrono::Duration,
    reset_ttl: chrono::Duration,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `validate_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            session: Keys::derive(config.token_secret(), SESSION_KEY_LABEL),
            reset: Keys::derive(config.token_secret(), RESET_KEY_LABEL),
            session_ttl: to_chrono(config.session_ttl),
            reset_ttl: to_chrono(config.reset_ttl),
            validation,
        }
    }

    fn keys(&self, purpose: TokenPurpose) -> &Keys {
        match purpose {
            TokenPurpose::Session => &self.session,
            TokenPurpose::PasswordReset => &self.reset,
        }
    }

    fn issue(
        &self,
        user_id: &UserId,
        username: &str,
        purpose: TokenPurpose,
        ttl: chrono::Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now + ttl;
        let claims = Claims {
            sub: user_id.into_uuid(),
            username: username.to_string(),
            purpose,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys(purpose).encoding,
        )?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Session token, valid for the configured session lifetime
    pub fn issue_session_token(
        &self,
        user_id: &UserId,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        self.issue(user_id, username, TokenPurpose::Session, self.session_ttl, now)
    }

    /// Password reset token, valid for the configured reset lifetime
    pub fn issue_reset_token(
        &self,
        user_id: &UserId,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        self.issue(user_id, username, TokenPurpose::PasswordReset, self.reset_ttl, now)
    }

    /// Verify signature, purpose and expiry as of `now`
    pub fn validate_at(
        &self,
        token: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.keys(purpose).decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;
        let claims = data.claims;

        if claims.purpose != purpose {
            return Err(TokenError::Invalid);
        }
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    pub fn validate(&self, token: &str, purpose: TokenPurpose) -> Result<Claims, TokenError> {
        self.validate_at(token, purpose, Utc::now())
    }
}

fn to_chrono(ttl: std::time::Duration) -> chrono::Duration {
    chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::new("test-secret").unwrap())
    }

    #[test]
    fn test_session_token_valid_until_one_hour() {
        let svc = service();
        let user_id = UserId::new();
        let now = Utc::now();
        let issued = svc.issue_session_token(&user_id, "alice", now).unwrap();

        let claims = svc.validate_at(&issued.token, TokenPurpose::Session, now).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.username, "alice");

        let almost = now + Duration::minutes(59);
        assert!(svc.validate_at(&issued.token, TokenPurpose::Session, almost).is_ok());

        let later = now + Duration::hours(1);
        assert!(matches!(
            svc.validate_at(&issued.token, TokenPurpose::Session, later),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_reset_token_expires_after_fifteen_minutes() {
        let svc = service();
        let now = Utc::now();
        let issued = svc.issue_reset_token(&UserId::new(), "alice", now).unwrap();

        assert!(svc
            .validate_at(&issued.token, TokenPurpose::PasswordReset, now + Duration::minutes(14))
            .is_ok());
        assert!(matches!(
            svc.validate_at(&issued.token, TokenPurpose::PasswordReset, now + Duration::minutes(15)),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_purposes_are_not_interchangeable() {
        let svc = service();
        let now = Utc::now();
        let session = svc.issue_session_token(&UserId::new(), "alice", now).unwrap();
        let reset = svc.issue_reset_token(&UserId::new(), "alice", now).unwrap();

        assert!(matches!(
            svc.validate_at(&session.token, TokenPurpose::PasswordReset, now),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(
            svc.validate_at(&reset.token, TokenPurpose::Session, now),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let ours = service();
        let theirs = TokenService::new(&AuthConfig::new("another-secret").unwrap());
        let now = Utc::now();
        let issued = theirs.issue_session_token(&UserId::new(), "mallory", now).unwrap();

        assert!(matches!(
            ours.validate_at(&issued.token, TokenPurpose::Session, now),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(
            ours.validate_at("not-a-jwt", TokenPurpose::Session, now),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_tokens_issued_together_differ() {
        let svc = service();
        let now = Utc::now();
        let user_id = UserId::new();
        let a = svc.issue_reset_token(&user_id, "alice", now).unwrap();
        let b = svc.issue_reset_token(&user_id, "alice", now).unwrap();
        assert_ne!(a.token, b.token);
    }
}
