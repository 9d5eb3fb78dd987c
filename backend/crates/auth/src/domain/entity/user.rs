//! User Entity
//!
//! Identity of an account holder. The password hash and reset state live
//! in [`Credential`](super::credential::Credential).

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, person_name::PersonName, user_name::UserName};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique login handle
    pub user_name: UserName,
    /// Unique address that receives reset links
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        user_name: UserName,
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        }
    }
}
