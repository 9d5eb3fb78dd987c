//! Change Password Use Case
//!
//! Sets a new password for the signed-in user. Outstanding session tokens
//! stay valid until they expire; an outstanding reset link is cancelled.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

pub struct ChangePasswordUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> ChangePasswordUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            credential_repo,
            config,
        }
    }

    pub async fn execute(&self, user_id: &UserId, new_password: String) -> AuthResult<()> {
        if new_password.is_empty() {
            return Err(AuthError::Validation("New password is required".to_string()));
        }
        let raw_password = RawPassword::new(new_password)?;

        if self.user_repo.find_user_by_id(user_id).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }
        let new_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        if !self.credential_repo.set_password(user_id, &new_hash).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
