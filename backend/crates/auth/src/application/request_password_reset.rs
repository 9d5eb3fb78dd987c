//! Request Password Reset Use Case
//!
//! Issues a 15 minute reset token, records its digest against the user and
//! mails a link carrying the token. Each request supersedes the previous one.

use std::sync::Arc;

use chrono::Utc;
use platform::mail::{MailMessage, Mailer};

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub const RESET_MAIL_SUBJECT: &str = "Password Reset Request - Happy Homes";

pub struct RequestPasswordResetUseCase<U, C, M>
where
    U: UserRepository,
    C: CredentialRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    mailer: Arc<M>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U, C, M> RequestPasswordResetUseCase<U, C, M>
where
    U: UserRepository,
    C: CredentialRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        credential_repo: Arc<C>,
        mailer: Arc<M>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credential_repo,
            mailer,
            tokens,
            config,
        }
    }

    /// Fails with `UserNotFound` for an unknown address. When the mail cannot
    /// be sent the token stays recorded and `MailDelivery` is returned.
    pub async fn execute(&self, email: &str) -> AuthResult<()> {
        if email.trim().is_empty() {
            return Err(AuthError::Validation("Email is required".to_string()));
        }
        let email = Email::new(email)?;

        let user = self
            .user_repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let issued = self
            .tokens
            .issue_reset_token(&user.user_id, user.user_name.as_str(), Utc::now())?;

        let digest = Credential::digest_token(&issued.token);
        if !self
            .credential_repo
            .set_reset_token(&user.user_id, &digest, issued.expires_at)
            .await?
        {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user.user_id, expires_at = %issued.expires_at, "Password reset requested");

        let message = reset_message(&user, &self.config.reset_link(&issued.token), &self.config);
        self.mailer.send(&message).await?;

        Ok(())
    }
}

fn reset_message(user: &User, link: &str, config: &AuthConfig) -> MailMessage {
    let minutes = config.reset_ttl.as_secs() / 60;
    let text = format!(
        "You requested a password reset for your Happy Homes account.\n\n\
         Please click the following link to reset your password:\n{link}\n\n\
         This link will expire in {minutes} minutes.\n\n\
         If you did not request this, please ignore this email."
    );
    let html = format!(
        "<h2>Password Reset Request</h2>\n\
         <p>You requested a password reset for your Happy Homes account.</p>\n\
         <p>Please click the link below to reset your password:</p>\n\
         <a href=\"{link}\">Reset Password</a>\n\
         <p>This link will expire in {minutes} minutes.</p>\n\
         <p>If you did not request this, please ignore this email.</p>"
    );
    MailMessage {
        to: user.email.as_str().to_string(),
        subject: RESET_MAIL_SUBJECT.to_string(),
        text,
        html,
    }
}
