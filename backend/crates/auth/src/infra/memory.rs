//! In-memory repository
//!
//! Same contract as [`PgAuthRepository`](super::postgres::PgAuthRepository),
//! including unique keys and the single-use reset swap. Used by tests and
//! local runs without a database.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    credentials: HashMap<UserId, Credential>,
}

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AuthError::Internal("auth store lock poisoned".to_string()))
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create_user(&self, user: &User, credential: &Credential) -> AuthResult<()> {
        let mut tables = self.lock()?;
        if tables.users.values().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UserNameTaken);
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        tables.users.insert(user.user_id, user.clone());
        tables.credentials.insert(credential.user_id, credential.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.lock()?.users.get(user_id).cloned())
    }

    async fn find_user_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| &u.user_name == user_name)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn user_name_exists(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.lock()?.users.values().any(|u| &u.user_name == user_name))
    }

    async fn email_exists(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.lock()?.users.values().any(|u| &u.email == email))
    }
}

impl CredentialRepository for InMemoryAuthRepository {
    async fn find_credential(&self, user_id: &UserId) -> AuthResult<Option<Credential>> {
        Ok(self.lock()?.credentials.get(user_id).cloned())
    }

    async fn set_reset_token(
        &self,
        user_id: &UserId,
        digest: &[u8],
        expires_at: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let mut tables = self.lock()?;
        let Some(credential) = tables.credentials.get_mut(user_id) else {
            return Ok(false);
        };
        credential.begin_reset(digest.to_vec(), expires_at);
        Ok(true)
    }

    async fn set_password(&self, user_id: &UserId, new_hash: &UserPassword) -> AuthResult<bool> {
        let mut tables = self.lock()?;
        let Some(credential) = tables.credentials.get_mut(user_id) else {
            return Ok(false);
        };
        credential.update_password(new_hash.clone());
        Ok(true)
    }

    async fn consume_reset_token(
        &self,
        user_id: &UserId,
        digest: &[u8],
        now: DateTime<Utc>,
        new_hash: &UserPassword,
    ) -> AuthResult<bool> {
        let mut tables = self.lock()?;
        let Some(credential) = tables.credentials.get_mut(user_id) else {
            return Ok(false);
        };
        if !credential.reset_matches(digest, now) {
            return Ok(false);
        }
        credential.update_password(new_hash.clone());
        Ok(true)
    }
}
