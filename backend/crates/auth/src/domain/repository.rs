//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::value_object::{email::Email, user_name::UserName, user_password::UserPassword};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user together with its credential, all or nothing.
    ///
    /// Fails with `UserNameTaken` / `EmailTaken` when a unique key is already used.
    async fn create_user(&self, user: &User, credential: &Credential) -> AuthResult<()>;

    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_user_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn user_name_exists(&self, user_name: &UserName) -> AuthResult<bool>;

    async fn email_exists(&self, email: &Email) -> AuthResult<bool>;
}

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>>;

    /// Record `digest` as the outstanding reset, replacing any earlier one.
    /// The password hash is left untouched.
    ///
    /// Returns `false` when the user has no credential.
    async fn set_reset_token(
        &self,
        user_id: &UserId,
        digest: &[u8],
        expires_at: DateTime<Utc>,
    ) -> AuthResult<bool>;

    /// Replace the password hash and drop any outstanding reset.
    ///
    /// Returns `false` when the user has no credential.
    async fn set_password(&self, user_id: &UserId, new_hash: &UserPassword) -> AuthResult<bool>;

    /// Swap in `new_hash` and clear the reset state, but only if `digest`
    /// is still the outstanding reset token and it is unexpired at `now`.
    ///
    /// Returns `false` when nothing was updated. Two concurrent calls with the
    /// same token can never both succeed.
    async fn consume_reset_token(
        &self,
        user_id: &UserId,
        digest: &[u8],
        now: DateTime<Utc>,
        new_hash: &UserPassword,
    ) -> AuthResult<bool>;
}
