//! Credential Entity
//!
//! Secrets of a user, kept apart from the [`User`](super::user::User) identity:
//! the password hash and the outstanding password reset, if any.
//!
//! Only a SHA-256 digest of the reset token is kept. A reset is "outstanding"
//! while both the digest and its expiry are set; issuing a new one replaces
//! the previous digest, so older reset tokens stop matching.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::user_password::UserPassword;

#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub password_hash: UserPassword,
    pub reset_token_digest: Option<Vec<u8>>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(user_id: UserId, password_hash: UserPassword) -> Self {
        Self {
            user_id,
            password_hash,
            reset_token_digest: None,
            reset_token_expires_at: None,
            updated_at: Utc::now(),
        }
    }

    /// Digest stored in place of a reset token
    pub fn digest_token(token: &str) -> Vec<u8> {
        platform::crypto::sha256(token.as_bytes()).to_vec()
    }

    /// Replace the password; any outstanding reset is dropped with it
    pub fn update_password(&mut self, new_password: UserPassword) {
        self.password_hash = new_password;
        self.clear_reset();
    }

    /// Record the digest of a newly issued reset token, superseding any previous one
    pub fn begin_reset(&mut self, digest: Vec<u8>, expires_at: DateTime<Utc>) {
        self.reset_token_digest = Some(digest);
        self.reset_token_expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    pub fn clear_reset(&mut self) {
        self.reset_token_digest = None;
        self.reset_token_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// True when `digest` is the outstanding reset and it has not expired at `now`
    pub fn reset_matches(&self, digest: &[u8], now: DateTime<Utc>) -> bool {
        match (&self.reset_token_digest, self.reset_token_expires_at) {
            (Some(stored), Some(expires_at)) => {
                now < expires_at && platform::crypto::constant_time_eq(stored, digest)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;
    use chrono::Duration;

    fn credential() -> Credential {
        let raw = RawPassword::new("Str0ng!Pass".to_string()).unwrap();
        Credential::new(UserId::new(), UserPassword::from_raw(&raw, None).unwrap())
    }

    #[test]
    fn test_reset_matches_only_latest_token() {
        let mut cred = credential();
        let now = Utc::now();
        cred.begin_reset(Credential::digest_token("first"), now + Duration::minutes(15));
        cred.begin_reset(Credential::digest_token("second"), now + Duration::minutes(15));

        assert!(!cred.reset_matches(&Credential::digest_token("first"), now));
        assert!(cred.reset_matches(&Credential::digest_token("second"), now));
    }

    #[test]
    fn test_reset_expires() {
        let mut cred = credential();
        let now = Utc::now();
        cred.begin_reset(Credential::digest_token("token"), now + Duration::minutes(15));

        let digest = Credential::digest_token("token");
        assert!(cred.reset_matches(&digest, now + Duration::minutes(14)));
        assert!(!cred.reset_matches(&digest, now + Duration::minutes(15)));
    }

    #[test]
    fn test_password_update_clears_reset() {
        let mut cred = credential();
        cred.begin_reset(Credential::digest_token("token"), Utc::now() + Duration::minutes(15));

        let raw = RawPassword::new("N3w!Passw0rd".to_string()).unwrap();
        cred.update_password(UserPassword::from_raw(&raw, None).unwrap());

        assert!(cred.reset_token_digest.is_none());
        assert!(cred.reset_token_expires_at.is_none());
    }
}
