//! Reset Password Use Case
//!
//! A reset token is accepted only when its signature and expiry check out
//! AND it is the outstanding reset on record for that user. Consuming it is
//! a single conditional write, so a token works at most once.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenPurpose, TokenService};
use crate::domain::entity::credential::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<C>
where
    C: CredentialRepository,
{
    credential_repo: Arc<C>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<C> ResetPasswordUseCase<C>
where
    C: CredentialRepository,
{
    pub fn new(credential_repo: Arc<C>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            credential_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        if input.token.trim().is_empty() || input.new_password.is_empty() {
            return Err(AuthError::Validation(
                "Token and new password are required".to_string(),
            ));
        }

        let now = Utc::now();
        let claims = self
            .tokens
            .validate_at(&input.token, TokenPurpose::PasswordReset, now)
            .map_err(|_| AuthError::InvalidOrExpiredResetToken)?;
        let user_id = claims.user_id();
        let digest = Credential::digest_token(&input.token);

        let credential = self
            .credential_repo
            .find_credential(&user_id)
            .await?
            .ok_or(AuthError::InvalidOrExpiredResetToken)?;
        if !credential.reset_matches(&digest, now) {
            return Err(AuthError::InvalidOrExpiredResetToken);
        }

        let raw_password = RawPassword::new(input.new_password)?;
        let new_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // Another request may have consumed or replaced the token meanwhile.
        if !self
            .credential_repo
            .consume_reset_token(&user_id, &digest, now, &new_hash)
            .await?
        {
            return Err(AuthError::InvalidOrExpiredResetToken);
        }

        tracing::info!(user_id = %user_id, "Password reset completed");
        Ok(())
    }
}
