//! Authenticate Use Case
//!
//! Exchanges an email/password pair for a short-lived access token.
//!
//! Lookup order: user cache, then the durable store. Cache trouble never
//! fails a login: read errors count as a miss and writes are best effort.

use std::sync::Arc;

use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::application::credentials::authenticate;
use crate::application::user_cache::UserCache;
use crate::domain::entity::user::UserRecord;
use crate::domain::repository::{CacheStore, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Authenticate input
pub struct AuthenticateInput {
    /// The user's email
    pub username: String,
    pub password: String,
}

/// Authenticate output
pub struct AuthenticateOutput {
    pub access_token: String,
}

/// Authenticate use case
pub struct AuthenticateUseCase<R, S>
where
    R: UserRepository,
    S: CacheStore,
{
    repo: Arc<R>,
    cache: Arc<UserCache<S>>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R, S> AuthenticateUseCase<R, S>
where
    R: UserRepository,
    S: CacheStore,
{
    pub fn new(
        repo: Arc<R>,
        cache: Arc<UserCache<S>>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            cache,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: AuthenticateInput) -> AuthResult<AuthenticateOutput> {
        // Anything that is not an email cannot be a registered user
        let Ok(email) = Email::new(input.username) else {
            return Err(AuthError::UserNotFound);
        };

        let Some(user) = self.lookup(&email).await? else {
            tracing::info!(email = %email, "Login for unknown user");
            return Err(AuthError::UserNotFound);
        };

        if !authenticate(Some(&user), &input.password) {
            return Err(AuthError::IncorrectPassword);
        }

        let access_token = self.tokens.mint_access_token(&user.token_claims())?;

        if let Err(e) = self
            .cache
            .update_field(email.as_str(), &self.config.access_token_field, &access_token)
            .await
        {
            tracing::warn!(email = %email, error = %e, "Failed to cache access token");
        }

        tracing::info!(user_id = %user.id, email = %email, "User authenticated");

        Ok(AuthenticateOutput { access_token })
    }

    async fn lookup(&self, email: &Email) -> AuthResult<Option<UserRecord>> {
        match self.cache.get_user(email).await {
            Ok(Some(user)) => {
                tracing::debug!(email = %email, "User cache hit");
                return Ok(Some(user));
            }
            Ok(None) => {
                tracing::debug!(email = %email, "User cache miss");
            }
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "User cache read failed");
            }
        }

        let user = self.repo.find_by_email(email).await?;

        if let Some(user) = &user {
            if let Err(e) = self.cache.set_user(user).await {
                tracing::warn!(email = %email, error = %e, "Failed to warm user cache");
            }
        }

        Ok(user)
    }
}
