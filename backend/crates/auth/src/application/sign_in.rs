//! Sign In Use Case
//!
//! Verifies a username/password pair and issues a session token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub token: String,
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U, C> SignInUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        credential_repo: Arc<C>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credential_repo,
            tokens,
            config,
        }
    }

    /// Fails with `UserNotFound` for an unknown username and
    /// `InvalidCredentials` for a wrong password.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.user_name.trim().is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        let raw_password = RawPassword::for_sign_in(input.password)?;

        // A name that could never have been registered cannot exist either.
        let user = match UserName::new(&input.user_name) {
            Ok(user_name) => self.user_repo.find_user_by_user_name(&user_name).await?,
            Err(_) => None,
        };
        let user = user.ok_or(AuthError::UserNotFound)?;

        let credential = self
            .credential_repo
            .find_credential(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("credential missing for user".to_string()))?;

        if !credential
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .issue_session_token(&user.user_id, user.user_name.as_str(), Utc::now())?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            token: issued.token,
            user,
        })
    }
}
