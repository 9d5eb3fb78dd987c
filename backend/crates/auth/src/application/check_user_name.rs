//! Check User Name Use Case

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

pub struct CheckUserNameUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CheckUserNameUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Whether the name is already registered. Read-only.
    pub async fn execute(&self, user_name: &str) -> AuthResult<bool> {
        if user_name.trim().is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        match UserName::new(user_name) {
            Ok(user_name) => self.user_repo.user_name_exists(&user_name).await,
            // Not a valid name, so nobody can hold it.
            Err(_) => Ok(false),
        }
    }
}
