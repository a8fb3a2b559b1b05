//! Sign Up Use Case
//!
//! Creates a new user account and warms the user cache with it.

use std::sync::Arc;

use chrono::NaiveDate;
use platform::password::hash_password;

use crate::application::user_cache::UserCache;
use crate::domain::entity::user::UserRecord;
use crate::domain::repository::{CacheStore, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i32,
    pub birth_date: NaiveDate,
}

/// Sign up use case
pub struct SignUpUseCase<R, S>
where
    R: UserRepository,
    S: CacheStore,
{
    repo: Arc<R>,
    cache: Arc<UserCache<S>>,
}

impl<R, S> SignUpUseCase<R, S>
where
    R: UserRepository,
    S: CacheStore,
{
    pub fn new(repo: Arc<R>, cache: Arc<UserCache<S>>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<UserRecord> {
        let email = Email::new(input.email)?;

        let name = input.name.trim();
        if name.is_empty() {
            return Err(AuthError::Validation("Name cannot be empty".to_string()));
        }
        if input.age < 0 {
            return Err(AuthError::Validation("Age cannot be negative".to_string()));
        }
        if input.password.is_empty() {
            return Err(AuthError::Validation("Password cannot be empty".to_string()));
        }

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let hashed = hash_password(&input.password)?;

        let user = UserRecord::new(
            email,
            name,
            hashed.into_phc_string(),
            input.age,
            input.birth_date,
        );

        self.repo.create(&user).await?;

        if let Err(e) = self.cache.set_user(&user).await {
            tracing::warn!(email = %user.email, error = %e, "Failed to warm user cache");
        }

        tracing::info!(user_id = %user.id, email = %user.email, "User signed up");

        Ok(user)
    }
}
