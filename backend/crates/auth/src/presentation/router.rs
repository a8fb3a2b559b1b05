//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::user_cache::UserCache;
use crate::domain::repository::{CacheStore, UserRepository};
use crate::error::AuthResult;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Create the Auth router for any repository and cache backend.
///
/// Fails when the token settings are unusable (non-HMAC algorithm).
pub fn auth_router<R, S>(repo: R, cache: UserCache<S>, config: AuthConfig) -> AuthResult<Router>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: CacheStore + Clone + Send + Sync + 'static,
{
    let tokens = Arc::new(config.token_service()?);

    let state = AuthAppState {
        repo: Arc::new(repo),
        cache: Arc::new(cache),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/auth/me", get(handlers::current_user))
        .route_layer(middleware::from_fn_with_state(tokens, require_bearer));

    let router = Router::new()
        .route("/auth", post(handlers::authenticate::<R, S>))
        .route("/auth/signup", post(handlers::sign_up::<R, S>))
        .with_state(state)
        .merge(protected);

    Ok(router)
}
